//! In-memory endpoint that records requests and replays canned replies.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use log::debug;

use crate::error::Error;
use crate::request::{ChatCompletionResponse, ChatRequest};

/// Stub endpoint for tests.
///
/// Replies are consumed in order; once exhausted every call fails with
/// [`Error::Other`].
#[derive(Debug, Default)]
pub struct StubEndpoint
{   replies: Mutex<VecDeque<Result<ChatCompletionResponse, Error>>>
  , requests: Mutex<Vec<ChatRequest>>
}

impl StubEndpoint
{   pub fn new() -> Self
    {   StubEndpoint::default()
    }

    /// Queue a reply
    pub fn push(
      self
    , reply: Result<ChatCompletionResponse, Error>
    ) -> Self
    {   self.lock_replies().push_back(reply);
        self
    }

    pub fn replying_content(content: impl Into<String>) -> Self
    {   StubEndpoint::new()
          .push(Ok(ChatCompletionResponse::from_content(content)))
    }

    pub fn replying_function_call(
      name: impl Into<String>
    , arguments: impl Into<String>
    ) -> Self
    {   StubEndpoint::new()
          .push(Ok(ChatCompletionResponse::from_function_call(
            name, arguments
          )))
    }

    pub fn failing(error: Error) -> Self
    {   StubEndpoint::new().push(Err(error))
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<ChatRequest>
    {   self.requests
          .lock()
          .unwrap_or_else(|poisoned| poisoned.into_inner())
          .clone()
    }

    fn lock_replies(&self)
      -> std::sync::MutexGuard<'_, VecDeque<Result<ChatCompletionResponse, Error>>>
    {   self.replies
          .lock()
          .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl super::ChatEndpoint for StubEndpoint
{   async fn create(
      &self
    , request: &ChatRequest
    ) -> Result<ChatCompletionResponse, Error>
    {   debug!("StubEndpoint received request for {}", request.model);
        self.requests
          .lock()
          .unwrap_or_else(|poisoned| poisoned.into_inner())
          .push(request.clone());
        self.lock_replies()
          .pop_front()
          .unwrap_or_else(|| Err(Error::Other(
            "StubEndpoint has no replies left".to_string()
          )))
    }
}
