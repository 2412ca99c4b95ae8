use std::fmt;

/// Custom error type for pokegpt operations
/// Implements Clone so a failure can be kept in a diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Transport-level failure (connect, TLS, body read)
    HttpError(String)
  , /// API answered with a non-success status
    ApiError
    {   status: u16
      , body: String
    }
  , /// Failed to decode the API response envelope
    ParseError(String)
  , /// No choices in API response
    NoChoicesInResponse
  , /// First choice carried no text content
    MissingContent
  , /// First choice carried no function call
    MissingFunctionCall
  , /// Payload was not valid JSON
    MalformedJson(String)
  , /// Payload was JSON but not an object
    NotAnObject
  , /// Payload object did not match the declared contract
    SchemaMismatch(String)
  , /// Generic error
    Other(String)
}

impl Error
{   /// Stable tag naming the failure kind, used in diagnostics
    pub fn kind(&self) -> &'static str
    {   match self
        {   Error::HttpError(_) => "http"
          , Error::ApiError { .. } => "api"
          , Error::ParseError(_) => "response_parse"
          , Error::NoChoicesInResponse => "no_choices"
          , Error::MissingContent => "missing_content"
          , Error::MissingFunctionCall => "missing_function_call"
          , Error::MalformedJson(_) => "malformed_json"
          , Error::NotAnObject => "not_an_object"
          , Error::SchemaMismatch(_) => "schema_mismatch"
          , Error::Other(_) => "other"
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError { status, body } => {
              write!(f, "API error ({}): {}", status, body)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::NoChoicesInResponse => {
              write!(f, "API response contained no choices")
            }
          , Error::MissingContent => {
              write!(f, "First choice has no message content")
            }
          , Error::MissingFunctionCall => {
              write!(f, "First choice has no function call")
            }
          , Error::MalformedJson(msg) => {
              write!(f, "Malformed JSON: {}", msg)
            }
          , Error::NotAnObject => {
              write!(f, "Expected a JSON object")
            }
          , Error::SchemaMismatch(msg) => {
              write!(f, "Schema mismatch: {}", msg)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn kinds_separate_malformed_from_mismatch()
    {   let malformed = Error::MalformedJson("eof".to_string());
        let mismatch = Error::SchemaMismatch("hp".to_string());
        assert_eq!(malformed.kind(), "malformed_json");
        assert_eq!(mismatch.kind(), "schema_mismatch");
        assert_ne!(malformed.kind(), mismatch.kind());
    }

    #[test]
    fn api_error_display_carries_status_and_body()
    {   let err = Error::ApiError
        {   status: 401
          , body: "bad key".to_string()
        };
        assert_eq!(err.to_string(), "API error (401): bad key");
        assert_eq!(err.kind(), "api");
    }
}
