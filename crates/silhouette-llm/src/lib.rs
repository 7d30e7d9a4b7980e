//! Silhouette LLM - generation provider trait and implementations

pub mod anthropic;
pub mod provider;
pub mod scripted;
pub mod types;

pub use anthropic::AnthropicProvider;
pub use provider::{GenerationError, GenerationProvider, GenerationResult};
pub use scripted::{ScriptedProvider, ScriptedReply};
pub use types::{Completion, GenMessage, GenerationRequest, Usage};
