//! Schema-constrained invoker.
//!
//! Unlike [`crate::chat`], nothing here returns an error. A failed call
//! comes back as [`Outcome::Diagnostic`] carrying the original messages.

use chrono::Local;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::InvokerConfig;
use crate::contract::PokemonContract;
use crate::error::Error;
use crate::providers::{ChatEndpoint, OpenAiEndpoint};
use crate::request::{
  ChatMessage, ChatOptions, ChatRequest, FunctionDescriptor
};

pub const DIAGNOSTIC_TAG: &str
  = "Error occurred while fetching from OpenAI API";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const DEFAULT_POKEMON: &str = "Pikachu";
pub const ANSWER_FUNCTION: &str = "get_answer_for_user_query";
const ANSWER_FUNCTION_DESCRIPTION: &str
  = "Get user answer in series of steps";
const POKEMON_MASTER_PROMPT: &str
  = "You are a Pokemon master and you've caught them all. \
     You now share your knowledge with the world.";

/// Failure record returned in place of a parsed payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord
{   pub error: String
  , pub error_kind: String
  , pub error_message: String
  , pub timestamp: String
  , pub messages: Vec<ChatMessage>
}

impl DiagnosticRecord
{   pub fn new(err: &Error, messages: Vec<ChatMessage>) -> Self
    {   DiagnosticRecord
        {   error: DIAGNOSTIC_TAG.to_string()
          , error_kind: err.kind().to_string()
          , error_message: err.to_string()
          , timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string()
          , messages
        }
    }
}

/// Result of a schema-constrained call
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T>
{   Parsed(T)
  , Diagnostic(DiagnosticRecord)
}

impl<T> Outcome<T>
{   pub fn is_parsed(&self) -> bool
    {   matches!(self, Outcome::Parsed(_))
    }

    pub fn parsed(self) -> Option<T>
    {   match self
        {   Outcome::Parsed(value) => Some(value)
          , Outcome::Diagnostic(_) => None
        }
    }

    pub fn diagnostic(self) -> Option<DiagnosticRecord>
    {   match self
        {   Outcome::Parsed(_) => None
          , Outcome::Diagnostic(record) => Some(record)
        }
    }
}

impl<T: Serialize> Outcome<T>
{   /// Either branch as a plain JSON mapping
    pub fn into_value(self) -> Value
    {   let value = match self
        {   Outcome::Parsed(value) => serde_json::to_value(value)
          , Outcome::Diagnostic(record) => serde_json::to_value(record)
        };
        value.unwrap_or_else(|e| {
          warn!("Outcome could not be serialized: {}", e);
          Value::Null
        })
    }
}

/// Asks the model to fill a declared schema and parses the answer
pub struct StructuredInvoker
{   model: String
  , endpoint: Box<dyn ChatEndpoint>
}

impl StructuredInvoker
{   /// Build against the OpenAI-compatible host named in `config`
    pub fn new(config: InvokerConfig) -> Self
    {   let endpoint = OpenAiEndpoint::from_config(&config);
        debug!("Creating StructuredInvoker: {:?}", config);
        StructuredInvoker::with_endpoint(config.model, endpoint)
    }

    pub fn with_endpoint(
      model: impl Into<String>
    , endpoint: impl ChatEndpoint + 'static
    ) -> Self
    {   StructuredInvoker
        {   model: model.into()
          , endpoint: Box::new(endpoint)
        }
    }

    /// Send `messages` with streaming off and `options` forwarded as-is.
    ///
    /// With functions declared the first choice's function-call arguments
    /// are parsed, otherwise its content is. Any failure returns a
    /// [`DiagnosticRecord`] immediately.
    pub async fn chat_completion_create(
      &self
    , messages: Vec<ChatMessage>
    , options: ChatOptions
    ) -> Outcome<Map<String, Value>>
    {   let request = ChatRequest::with_options(
          self.model.clone()
        , messages
        , options
        );
        let result = self.request_object(&request).await;
        match result
        {   Ok(object) => Outcome::Parsed(object)
          , Err(err) => diagnose(&err, request.messages)
        }
    }

    /// Describe `name` (default Pikachu) through the forced
    /// `get_answer_for_user_query` function.
    pub async fn get_pokemon(&self, name: Option<&str>)
      -> Outcome<PokemonContract>
    {   let name = name.unwrap_or(DEFAULT_POKEMON);
        debug!("get_pokemon: {}", name);

        let request = ChatRequest::with_options(
          self.model.clone()
        , pokemon_messages(name)
        , pokemon_options()
        );
        let result = self.request_object(&request)
          .await
          .and_then(|object| {
            PokemonContract::from_value(&Value::Object(object))
          });
        match result
        {   Ok(pokemon) => Outcome::Parsed(pokemon)
          , Err(err) => diagnose(&err, request.messages)
        }
    }

    async fn request_object(&self, request: &ChatRequest)
      -> Result<Map<String, Value>, Error>
    {   let response = self.endpoint.create(request).await?;
        let message = response.first_message()?;

        let payload = if request.has_functions()
        {   message.function_call
              .as_ref()
              .map(|call| call.arguments.as_str())
              .ok_or(Error::MissingFunctionCall)?
        } else
        {   message.content
              .as_deref()
              .ok_or(Error::MissingContent)?
        };

        parse_object(payload)
    }
}

fn diagnose<T>(err: &Error, messages: Vec<ChatMessage>) -> Outcome<T>
{   warn!("Structured call failed ({}): {}", err.kind(), err);
    Outcome::Diagnostic(DiagnosticRecord::new(err, messages))
}

fn parse_object(payload: &str) -> Result<Map<String, Value>, Error>
{   match serde_json::from_str::<Value>(payload)
    {   Ok(Value::Object(object)) => Ok(object)
      , Ok(_) => Err(Error::NotAnObject)
      , Err(e) => Err(Error::MalformedJson(e.to_string()))
    }
}

pub fn pokemon_messages(name: &str) -> Vec<ChatMessage>
{   vec![
      ChatMessage::system(POKEMON_MASTER_PROMPT)
    , ChatMessage::user(format!(
        "Provide a holisitic description of {}, a Pokemon.",
        name
      ))
    ]
}

pub fn pokemon_options() -> ChatOptions
{   ChatOptions::forced_function(FunctionDescriptor
    {   name: ANSWER_FUNCTION.to_string()
      , description: ANSWER_FUNCTION_DESCRIPTION.to_string()
      , parameters: PokemonContract::json_schema()
    })
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::providers::StubEndpoint;
    use serde_json::json;

    #[tokio::test]
    async fn content_path_parses_plain_json()
    {   let stub = StubEndpoint::replying_content(r#"{"answer": "42"}"#);
        let invoker = StructuredInvoker::with_endpoint("m", stub);
        let outcome = invoker
          .chat_completion_create(
            vec![ChatMessage::user("q")]
          , ChatOptions::default()
          )
          .await;
        let object = outcome.parsed().unwrap();
        assert_eq!(object["answer"], json!("42"));
    }

    #[tokio::test]
    async fn function_declared_but_content_reply_is_diagnosed()
    {   let stub = StubEndpoint::replying_content(r#"{"answer": "42"}"#);
        let invoker = StructuredInvoker::with_endpoint("m", stub);
        let record = invoker
          .chat_completion_create(vec![ChatMessage::user("q")], pokemon_options())
          .await
          .diagnostic()
          .unwrap();
        assert_eq!(record.error_kind, "missing_function_call");
    }

    #[tokio::test]
    async fn json_array_is_diagnosed_as_not_an_object()
    {   let stub = StubEndpoint::replying_content("[1, 2]");
        let invoker = StructuredInvoker::with_endpoint("m", stub);
        let record = invoker
          .chat_completion_create(vec![], ChatOptions::default())
          .await
          .diagnostic()
          .unwrap();
        assert_eq!(record.error_kind, "not_an_object");
    }

    #[test]
    fn diagnostic_timestamp_uses_fixed_format()
    {   let record = DiagnosticRecord::new(&Error::NoChoicesInResponse, vec![]);
        assert!(
          chrono::NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_FORMAT)
            .is_ok()
        );
        assert_eq!(record.error, DIAGNOSTIC_TAG);
        assert_eq!(record.error_message, "API response contained no choices");
    }

    #[test]
    fn pokemon_prompt_names_the_subject()
    {   let messages = pokemon_messages("Eevee");
        assert_eq!(messages[0], ChatMessage::system(POKEMON_MASTER_PROMPT));
        assert_eq!(
          messages[1].content
        , "Provide a holisitic description of Eevee, a Pokemon."
        );
    }
}
