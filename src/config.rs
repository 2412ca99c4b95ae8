//! Configuration for the schema-constrained invoker

use log::debug;
use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible API base
pub const OPENAI_API_BASE: &str
  = "https://api.openai.com/v1";

pub const MODEL_ENV: &str = "OPENAI_MODEL";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const API_BASE_ENV: &str = "OPENAI_API_BASE";

/// Invoker configuration, fixed once the invoker is built
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvokerConfig
{   /// Model identifier, passed through unchecked
    pub model: String
  , /// API credential, passed through unchecked
    pub api_key: String
  , /// API base URL, without the trailing `/chat/completions`
    pub api_base: String
}

impl InvokerConfig
{   pub fn new(
      model: impl Into<String>
    , api_key: impl Into<String>
    ) -> Self
    {   InvokerConfig
        {   model: model.into()
          , api_key: api_key.into()
          , api_base: OPENAI_API_BASE.to_string()
        }
    }

    /// Point the invoker at a different OpenAI-compatible host
    pub fn with_api_base(mut self, api_base: impl Into<String>)
      -> Self
    {   self.api_base = api_base.into();
        self
    }

    /// Read model, key and optional base from the environment.
    /// Missing model or key become empty strings and fail remotely.
    pub fn from_env() -> Self
    {   let model = std::env::var(MODEL_ENV)
          .unwrap_or_default();
        let api_key = std::env::var(API_KEY_ENV)
          .unwrap_or_default();
        let api_base = std::env::var(API_BASE_ENV)
          .unwrap_or_else(|_| OPENAI_API_BASE.to_string());
        debug!(
          "Loaded invoker config from env: model={:?}, base={}",
          model, api_base
        );
        InvokerConfig
        {   model
          , api_key
          , api_base
        }
    }
}

impl Default for InvokerConfig
{   fn default() -> Self
    {   InvokerConfig::new(String::new(), String::new())
    }
}

// Keep the credential out of debug output and logs
impl std::fmt::Debug for InvokerConfig
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.debug_struct("InvokerConfig")
          .field("model", &self.model)
          .field("api_key", &"<redacted>")
          .field("api_base", &self.api_base)
          .finish()
    }
}
