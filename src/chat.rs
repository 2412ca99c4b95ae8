//! Plain chat: one system/user pair in, the first choice's text out.
//!
//! Errors are never caught here; whatever the endpoint reports reaches
//! the caller as-is.

use log::{debug, error};

use crate::error::Error;
use crate::providers::{ChatEndpoint, OpenAiEndpoint};
use crate::request::{system_user_pair, ChatRequest};

/// Send `context` as the system message and `prompt` as the user
/// message to `model` on the default OpenAI host using `key`.
pub async fn chat_with_gpt(
  key: &str
, context: &str
, prompt: &str
, model: &str
) -> Result<String, Error>
{   let endpoint = OpenAiEndpoint::new(
      crate::config::OPENAI_API_BASE
    , key
    );
    chat_with_endpoint(&endpoint, context, prompt, model).await
}

/// Same as [`chat_with_gpt`] against any endpoint
pub async fn chat_with_endpoint(
  endpoint: &dyn ChatEndpoint
, context: &str
, prompt: &str
, model: &str
) -> Result<String, Error>
{   debug!("chat_with_endpoint for model: {}", model);
    let request = ChatRequest::new(
      model
    , system_user_pair(context, prompt)
    );

    let response = endpoint.create(&request).await?;

    response.first_message()?
      .content
      .clone()
      .ok_or_else(|| {
        error!("First choice has no content");
        Error::MissingContent
      })
}
