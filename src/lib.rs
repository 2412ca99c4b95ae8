pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod chat;
pub mod contract;
pub mod structured;

/*

pokegpt: thin async client over an OpenAI-compatible chat-completion API.

pokegpt/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports
│   ├── error.rs        # Error enum and kind tags
│   ├── config.rs       # InvokerConfig (model, key, api base)
│   ├── request.rs      # Messages, function descriptors, wire types
│   ├── providers/      # ChatEndpoint trait and implementations
│   │   ├── mod.rs
│   │   ├── openai.rs   # reqwest endpoint
│   │   └── stub.rs     # recording stub for tests
│   ├── chat.rs         # plain system/user chat, errors propagate
│   ├── contract.rs     # 23-field Pokemon contract and its schema
│   └── structured.rs   # schema-constrained calls, diagnostics
└── tests/

*/

pub use chat::{chat_with_endpoint, chat_with_gpt};
pub use config::InvokerConfig;
pub use contract::PokemonContract;
pub use error::Error;
pub use providers::{ChatEndpoint, OpenAiEndpoint, StubEndpoint};
pub use request::{ChatMessage, ChatOptions, Role};
pub use structured::{DiagnosticRecord, Outcome, StructuredInvoker};
