//! Chat-completion endpoints

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Error;
use crate::request::{ChatCompletionResponse, ChatRequest};

pub mod openai;
pub mod stub;

// Re-export for convenience
pub use openai::OpenAiEndpoint;
pub use stub::StubEndpoint;

/// One round trip to a chat-completion API.
///
/// Invokers only talk to the remote side through this trait, so tests
/// can swap in [`StubEndpoint`] without a network.
#[async_trait]
pub trait ChatEndpoint: Send + Sync
{   async fn create(
      &self
    , request: &ChatRequest
    ) -> Result<ChatCompletionResponse, Error>;
}

// Lets a caller keep a handle on an endpoint it hands to an invoker
#[async_trait]
impl<T: ChatEndpoint + ?Sized> ChatEndpoint for Arc<T>
{   async fn create(
      &self
    , request: &ChatRequest
    ) -> Result<ChatCompletionResponse, Error>
    {   (**self).create(request).await
    }
}
