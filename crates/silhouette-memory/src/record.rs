//! Memory records and the importance heuristic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Retention tiers, ordered fastest/most-volatile first.
///
/// `Sensory` is the capped volatile list; `Semantic` and `Procedural` are
/// the durable tiers backing the persistent slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryTier {
    Sensory,
    Working,
    Episodic,
    Semantic,
    Procedural,
}

impl MemoryTier {
    pub fn is_durable(self) -> bool {
        matches!(self, MemoryTier::Semantic | MemoryTier::Procedural)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MemoryTier::Sensory => "sensory",
            MemoryTier::Working => "working",
            MemoryTier::Episodic => "episodic",
            MemoryTier::Semantic => "semantic",
            MemoryTier::Procedural => "procedural",
        }
    }
}

impl std::fmt::Display for MemoryTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single memory record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: Uuid,
    pub content: String,
    /// Pre-compression copy, kept when a record is rewritten in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub tier: MemoryTier,
    pub importance: f64,
    pub tags: Vec<String>,
    pub access_count: u32,
    pub last_accessed: DateTime<Utc>,
    pub decay_health: f64,
    pub compression_level: u8,
}

impl MemoryRecord {
    pub fn new(content: impl Into<String>, tier: MemoryTier, tags: Vec<String>) -> Self {
        let content = content.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            importance: importance_of(&content),
            content,
            original: None,
            timestamp: now,
            tier,
            tags,
            access_count: 0,
            last_accessed: now,
            decay_health: 100.0,
            compression_level: 0,
        }
    }

    /// Case-insensitive match against content or any tag.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    pub(crate) fn touch(&mut self) {
        self.access_count = self.access_count.saturating_add(1);
        self.last_accessed = Utc::now();
    }
}

/// Keywords that mark a record as high-signal. Matched case-sensitively.
const IMPORTANCE_KEYWORDS: &[&str] = &[
    "critical",
    "error",
    "decision",
    "architecture",
    "security",
    "protocol",
];

/// Importance heuristic: base 0.5, +0.2 for long content, +0.3 for any
/// flagged keyword, capped at 1.0. Computed once at creation.
pub fn importance_of(content: &str) -> f64 {
    let mut score: f64 = 0.5;
    if content.len() > 100 {
        score += 0.2;
    }
    if IMPORTANCE_KEYWORDS.iter().any(|k| content.contains(k)) {
        score += 0.3;
    }
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importance_stays_in_range() {
        for content in ["", "short", &"x".repeat(500), "critical security error"] {
            let score = importance_of(content);
            assert!((0.5..=1.0).contains(&score), "{content}: {score}");
        }
    }

    #[test]
    fn importance_rewards_length_and_keywords() {
        let short = importance_of("note");
        let long = importance_of(&"a".repeat(150));
        let keyword = importance_of("critical note");
        let both = importance_of(&format!("critical {}", "a".repeat(150)));

        assert_eq!(short, 0.5);
        assert_eq!(long, 0.7);
        assert_eq!(keyword, 0.8);
        assert_eq!(both, 1.0);
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(importance_of("CRITICAL"), 0.5);
        assert_eq!(importance_of("critical"), 0.8);
    }

    #[test]
    fn match_is_case_insensitive_on_content_and_tags() {
        let record = MemoryRecord::new("Hello World", MemoryTier::Sensory, vec!["Alpha".into()]);
        assert!(record.matches("hello"));
        assert!(record.matches("alpha"));
        assert!(!record.matches("beta"));
    }
}
