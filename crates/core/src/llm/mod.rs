//! AI-assisted formatting: prompts, model selection and the language-model client.

pub mod client;
pub mod formatter;
pub mod model;
pub mod prompts;

#[cfg(feature = "fetch")]
pub use client::AnthropicClient;
pub use client::{CompletionRequest, LlmClient};
pub use formatter::{Formatter, parse_formatted};
pub use model::{DEFAULT_MODEL, EnvSource, ProcessEnv, resolve_model};
