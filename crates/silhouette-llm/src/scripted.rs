//! ScriptedProvider — deterministic generation replies for testing
//!
//! Returns canned completions in order; once the script is exhausted it
//! falls back to a default reply. Used by workflow and gateway tests.

use crate::provider::{GenerationError, GenerationProvider, GenerationResult};
use crate::types::{Completion, GenerationRequest, Usage};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// One scripted reply
#[derive(Clone, Debug)]
pub enum ScriptedReply {
    /// Return this text with a small fixed usage
    Text(String),
    /// Return text with explicit token usage
    TextWithUsage {
        text: String,
        input_tokens: u64,
        output_tokens: u64,
    },
    /// Fail the call
    Error(String),
}

impl ScriptedReply {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

pub struct ScriptedProvider {
    replies: Mutex<VecDeque<ScriptedReply>>,
    default_reply: ScriptedReply,
    call_count: AtomicUsize,
}

impl ScriptedProvider {
    /// Always return the same reply.
    pub fn constant(reply: ScriptedReply) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            default_reply: reply,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Consume replies in order, then fall back to a default text reply.
    pub fn sequence(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            default_reply: ScriptedReply::text("(scripted: sequence exhausted)"),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn next_reply(&self) -> ScriptedReply {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock().unwrap_or_else(|p| p.into_inner());
        replies.pop_front().unwrap_or_else(|| self.default_reply.clone())
    }
}

#[async_trait::async_trait]
impl GenerationProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _request: GenerationRequest) -> GenerationResult<Completion> {
        match self.next_reply() {
            ScriptedReply::Text(text) => Ok(Completion {
                text,
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
            }),
            ScriptedReply::TextWithUsage {
                text,
                input_tokens,
                output_tokens,
            } => Ok(Completion {
                text,
                usage: Usage {
                    input_tokens,
                    output_tokens,
                },
            }),
            ScriptedReply::Error(message) => Err(GenerationError::RequestFailed(message)),
        }
    }
}
