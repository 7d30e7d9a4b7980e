//! Generation request and completion types

use serde::{Deserialize, Serialize};

/// A generation request
#[derive(Clone, Debug, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<GenMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            messages: Vec::new(),
            system: None,
            max_tokens: 1024,
            temperature: None,
        }
    }
}

/// Message in a generation conversation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenMessage {
    pub role: String,
    pub content: String,
}

impl GenMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Token usage reported by the provider
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl Usage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// A whole completion: the assistant text plus token usage
#[derive(Clone, Debug)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
}
