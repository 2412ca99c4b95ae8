//! Chat-completion request and response types

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ===== Message Types =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role
{   System
  , User
  , Assistant
}

/// One role-tagged message entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: Role
  , pub content: String
}

impl ChatMessage
{   pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: Role::System
          , content: content.into()
        }
    }

    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: Role::User
          , content: content.into()
        }
    }
}

/// System context first, user prompt second
pub fn system_user_pair(
  context: impl Into<String>
, prompt: impl Into<String>
) -> Vec<ChatMessage>
{   vec![
      ChatMessage::system(context)
    , ChatMessage::user(prompt)
    ]
}

// ===== Function Calling =====

/// Function the model may be forced to call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor
{   pub name: String
  , pub description: String
  , /// JSON schema of the arguments
    pub parameters: Value
}

/// Forces the model to answer through the named function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCallSelector
{   pub name: String
}

/// Optional extras forwarded verbatim on the request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatOptions
{   pub functions: Option<Vec<FunctionDescriptor>>
  , pub function_call: Option<FunctionCallSelector>
  , /// Any other body field (`temperature`, `tools`, `response_format`, ...)
    pub extra: Map<String, Value>
}

impl ChatOptions
{   /// Declare a single function and force the model to call it
    pub fn forced_function(function: FunctionDescriptor) -> Self
    {   let selector = FunctionCallSelector
        {   name: function.name.clone()
        };
        ChatOptions
        {   functions: Some(vec![function])
          , function_call: Some(selector)
          , extra: Map::new()
        }
    }

    /// Add one extra body field
    pub fn with_extra(
      mut self
    , key: impl Into<String>
    , value: Value
    ) -> Self
    {   self.extra.insert(key.into(), value);
        self
    }

    /// An empty function list counts as none
    pub fn has_functions(&self) -> bool
    {   matches!(&self.functions, Some(f) if !f.is_empty())
    }
}

// Keys owned by typed `ChatRequest` fields
const RESERVED_KEYS: [&str; 5]
  = ["model", "messages", "stream", "functions", "function_call"];

// ===== Wire Request =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<FunctionDescriptor>>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCallSelector>
  , #[serde(flatten)]
    pub extra: Map<String, Value>
}

impl ChatRequest
{   /// Bare request: model and messages only
    pub fn new(
      model: impl Into<String>
    , messages: Vec<ChatMessage>
    ) -> Self
    {   ChatRequest
        {   model: model.into()
          , messages
          , stream: None
          , functions: None
          , function_call: None
          , extra: Map::new()
        }
    }

    /// Non-streaming request carrying the given options
    pub fn with_options(
      model: impl Into<String>
    , messages: Vec<ChatMessage>
    , options: ChatOptions
    ) -> Self
    {   let functions = if options.has_functions()
        {   options.functions
        } else
        {   None
        };
        let mut extra = options.extra;
        extra.retain(|key, _| {
          let reserved = RESERVED_KEYS.contains(&key.as_str());
          if reserved
          {   warn!("Dropping extra option that shadows {}", key);
          }
          !reserved
        });
        ChatRequest
        {   model: model.into()
          , messages
          , stream: Some(false)
          , functions
          , function_call: options.function_call
          , extra
        }
    }

    /// True when the reply is expected as a function call
    pub fn has_functions(&self) -> bool
    {   matches!(&self.functions, Some(f) if !f.is_empty())
    }
}

// ===== Wire Response =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice
{   pub message: ResponseMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage
{   #[serde(default)]
    pub role: Option<Role>
  , #[serde(default)]
    pub content: Option<String>
  , #[serde(default)]
    pub function_call: Option<FunctionCall>
}

/// Function call chosen by the model; arguments are a JSON string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall
{   pub name: String
  , pub arguments: String
}

impl ChatCompletionResponse
{   /// Response with one plain-text choice
    pub fn from_content(content: impl Into<String>) -> Self
    {   Self::single(ResponseMessage
        {   role: Some(Role::Assistant)
          , content: Some(content.into())
          , function_call: None
        })
    }

    /// Response with one function-call choice
    pub fn from_function_call(
      name: impl Into<String>
    , arguments: impl Into<String>
    ) -> Self
    {   Self::single(ResponseMessage
        {   role: Some(Role::Assistant)
          , content: None
          , function_call: Some(FunctionCall
            {   name: name.into()
              , arguments: arguments.into()
            })
        })
    }

    fn single(message: ResponseMessage) -> Self
    {   ChatCompletionResponse
        {   choices: vec![
              Choice
              {   message
                , finish_reason: Some("stop".to_string())
              }
            ]
        }
    }

    pub fn first_message(&self)
      -> Result<&ResponseMessage, crate::error::Error>
    {   self.choices.first()
          .map(|c| &c.message)
          .ok_or(crate::error::Error::NoChoicesInResponse)
    }
}
