use async_trait::async_trait;
use log::{debug, error, trace};

use crate::error::Error;
use crate::request::{ChatCompletionResponse, ChatRequest};

/// HTTP client for an OpenAI-compatible `/chat/completions` route
#[derive(Clone)]
pub struct OpenAiEndpoint
{   api_base: String
  , api_key: String
  , http_client: reqwest::Client
}

impl OpenAiEndpoint
{   pub fn new(
      api_base: impl Into<String>
    , api_key: impl Into<String>
    ) -> Self
    {   let api_base = api_base.into();
        debug!("Creating OpenAiEndpoint for {}", api_base);
        OpenAiEndpoint
        {   api_base
          , api_key: api_key.into()
          , http_client: reqwest::Client::new()
        }
    }

    pub fn from_config(config: &crate::config::InvokerConfig) -> Self
    {   OpenAiEndpoint::new(
          config.api_base.clone()
        , config.api_key.clone()
        )
    }

    fn completions_url(&self) -> String
    {   format!(
          "{}/chat/completions",
          self.api_base.trim_end_matches('/')
        )
    }
}

impl std::fmt::Debug for OpenAiEndpoint
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.debug_struct("OpenAiEndpoint")
          .field("api_base", &self.api_base)
          .finish_non_exhaustive()
    }
}

#[async_trait]
impl super::ChatEndpoint for OpenAiEndpoint
{   async fn create(
      &self
    , request: &ChatRequest
    ) -> Result<ChatCompletionResponse, Error>
    {   debug!(
          "Sending chat completion: model={}, messages={}",
          request.model, request.messages.len()
        );
        trace!("Chat request: {:?}", request);

        let response = self.http_client
          .post(self.completions_url())
          .header("Authorization", format!("Bearer {}", self.api_key))
          .header("Content-Type", "application/json")
          .json(request)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            Error::HttpError(e.to_string())
          })?;

        let status = response.status();
        trace!("Chat response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Chat API error {}: {}", status, error_text);
            return Err(Error::ApiError
            {   status: status.as_u16()
              , body: error_text
            });
        }

        let chat_response: ChatCompletionResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            Error::ParseError(e.to_string())
          })?;

        debug!(
          "Chat completion returned {} choices",
          chat_response.choices.len()
        );
        Ok(chat_response)
    }
}
