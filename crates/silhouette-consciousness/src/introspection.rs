//! Introspection filter — extracts thought spans from generated text

use regex::Regex;

pub const THOUGHT_OPEN: &str = "<thinking>";
pub const THOUGHT_CLOSE: &str = "</thinking>";

const DEFAULT_DEPTH: u32 = 3;

/// Result of one filtering pass
#[derive(Clone, Debug)]
pub struct Introspection {
    /// Input with all thought spans removed, trimmed.
    pub clean_output: String,
    /// Extracted thought spans, in order, inner text preserved exactly.
    pub thoughts: Vec<String>,
    /// Configured depth constant when any thought was present, else 0.
    pub depth: u32,
    /// Length-ratio heuristic in [0.5, 0.99].
    pub coherence: f64,
}

pub struct IntrospectionFilter {
    pattern: Regex,
    depth: u32,
}

impl IntrospectionFilter {
    pub fn new(depth: u32) -> Self {
        Self {
            // Non-greedy across newlines; unterminated markers fall through
            // unmatched and the input passes unchanged.
            pattern: Regex::new(r"(?s)<thinking>(.*?)</thinking>")
                .expect("thought pattern is valid"),
            depth,
        }
    }

    /// Strip thought spans and score the remainder. Total function: text
    /// without well-formed delimiters yields zero thoughts and the input
    /// unchanged (modulo trim).
    pub fn process(&self, raw: &str) -> Introspection {
        let thoughts: Vec<String> = self
            .pattern
            .captures_iter(raw)
            .map(|c| c[1].to_string())
            .collect();

        let clean_output = self.pattern.replace_all(raw, "").trim().to_string();

        let coherence = if thoughts.is_empty() {
            0.5
        } else {
            let thought_len: usize = thoughts.iter().map(|t| t.len()).sum();
            (0.5 + 0.2 * thought_len as f64 / (clean_output.len() + 1) as f64).min(0.99)
        };

        Introspection {
            depth: if thoughts.is_empty() { 0 } else { self.depth },
            clean_output,
            thoughts,
            coherence,
        }
    }

    /// Prompt template consumed by the generation client.
    pub fn build_prompt(&self, role: &str, memory_context: &str) -> String {
        format!(
            "You are {role} within the Silhouette agency.\n\
             Reason inside {open}...{close} blocks before answering; \
             only text outside those blocks reaches the operator.\n\n\
             Relevant memory:\n{memory}",
            role = role,
            open = THOUGHT_OPEN,
            close = THOUGHT_CLOSE,
            memory = if memory_context.is_empty() {
                "(none)"
            } else {
                memory_context
            },
        )
    }
}

impl Default for IntrospectionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}
