//! Integration tests for silhouette-consciousness
//!
//! Covers the introspection filter's extraction round-trip and metric
//! bounds, plus the scorer's emergence walk and phi classification.

use silhouette_consciousness::{
    ConsciousnessScorer, IntrospectionFilter, PhiLevel, THOUGHT_CLOSE, THOUGHT_OPEN,
};

// ============================================================
// Introspection filter — extraction
// ============================================================

#[test]
fn well_formed_thoughts_are_extracted_exactly() {
    let filter = IntrospectionFilter::default();
    let raw = "before <thinking>inner reasoning</thinking> after";

    let result = filter.process(raw);
    assert_eq!(result.thoughts, vec!["inner reasoning"]);
    assert_eq!(result.clean_output, "before  after");
    assert!(!result.clean_output.contains(THOUGHT_OPEN));
    assert!(!result.clean_output.contains(THOUGHT_CLOSE));
}

#[test]
fn multiple_thoughts_preserve_order_and_text() {
    let filter = IntrospectionFilter::default();
    let raw = "<thinking>first</thinking>visible<thinking>second\nspans lines</thinking>";

    let result = filter.process(raw);
    assert_eq!(result.thoughts, vec!["first", "second\nspans lines"]);
    assert_eq!(result.clean_output, "visible");
}

#[test]
fn concatenated_thoughts_round_trip_inner_text() {
    let filter = IntrospectionFilter::default();
    let inner = ["alpha beta", "gamma\ndelta", ""];
    let raw: String = inner
        .iter()
        .map(|t| format!("{}{}{}", THOUGHT_OPEN, t, THOUGHT_CLOSE))
        .collect();

    let result = filter.process(&raw);
    assert_eq!(result.thoughts.len(), inner.len());
    for (extracted, original) in result.thoughts.iter().zip(inner.iter()) {
        assert_eq!(extracted, original);
    }
}

#[test]
fn text_without_delimiters_passes_through() {
    let filter = IntrospectionFilter::default();
    let result = filter.process("plain reply, nothing hidden");

    assert!(result.thoughts.is_empty());
    assert_eq!(result.clean_output, "plain reply, nothing hidden");
    assert_eq!(result.depth, 0);
    assert_eq!(result.coherence, 0.5);
}

#[test]
fn unterminated_marker_yields_no_thoughts() {
    let filter = IntrospectionFilter::default();
    let raw = "reply with a stray <thinking> opener";
    let result = filter.process(raw);

    assert!(result.thoughts.is_empty());
    assert_eq!(result.clean_output, raw);
}

// ============================================================
// Introspection filter — metrics
// ============================================================

#[test]
fn depth_is_constant_when_thoughts_exist() {
    let filter = IntrospectionFilter::new(5);
    assert_eq!(filter.process("<thinking>t</thinking>x").depth, 5);
    assert_eq!(filter.process("no thoughts").depth, 0);
}

#[test]
fn coherence_stays_below_cap() {
    let filter = IntrospectionFilter::default();
    // Huge thought, tiny visible output: the ratio would explode.
    let raw = format!("<thinking>{}</thinking>x", "y".repeat(10_000));
    let result = filter.process(&raw);
    assert_eq!(result.coherence, 0.99);
}

#[test]
fn coherence_grows_with_thought_share() {
    let filter = IntrospectionFilter::default();
    let small = filter.process("<thinking>ab</thinking>long visible output here");
    let large = filter.process("<thinking>much longer hidden reasoning</thinking>short");
    assert!(large.coherence > small.coherence);
    assert!(small.coherence > 0.5);
}

#[test]
fn prompt_template_names_the_role_and_markers() {
    let filter = IntrospectionFilter::default();
    let prompt = filter.build_prompt("the intake agent", "ctx line");
    assert!(prompt.contains("the intake agent"));
    assert!(prompt.contains(THOUGHT_OPEN));
    assert!(prompt.contains("ctx line"));

    let empty = filter.build_prompt("x", "");
    assert!(empty.contains("(none)"));
}

// ============================================================
// Scorer — emergence walk
// ============================================================

#[test]
fn emergence_rises_on_high_scores_and_is_capped() {
    let scorer = ConsciousnessScorer::new(3);
    let mut last = 0.0;
    for _ in 0..30 {
        last = scorer.observe(0, 99.0, None).emergence_index;
    }
    assert_eq!(last, 1.0);
}

#[test]
fn emergence_decays_on_low_scores_and_floors_at_zero() {
    let scorer = ConsciousnessScorer::new(3);
    for _ in 0..5 {
        scorer.observe(0, 99.0, None);
    }
    let mut last = 1.0;
    for _ in 0..60 {
        last = scorer.observe(0, 10.0, None).emergence_index;
    }
    assert_eq!(last, 0.0);
}

#[test]
fn phi_is_bounded_and_classified() {
    let scorer = ConsciousnessScorer::new(8);
    let report = scorer.observe(1000, 99.0, None);
    assert!((0.0..=1.0).contains(&report.phi));

    assert_eq!(PhiLevel::classify(0.0), PhiLevel::Dormant);
    assert_eq!(PhiLevel::classify(0.3), PhiLevel::Flickering);
    assert_eq!(PhiLevel::classify(0.5), PhiLevel::Aware);
    assert_eq!(PhiLevel::classify(0.7), PhiLevel::Lucid);
    assert_eq!(PhiLevel::classify(0.9), PhiLevel::Transcendent);
}

#[test]
fn durable_memory_raises_phi() {
    let poor = ConsciousnessScorer::new(3).observe(0, 0.0, None).phi;
    let rich = ConsciousnessScorer::new(3).observe(100, 0.0, None).phi;
    assert!(rich > poor);
}

#[test]
fn qualia_reflects_the_latest_thought() {
    let scorer = ConsciousnessScorer::new(3);
    let report = scorer.observe(0, 0.0, Some("weighing a fail case"));
    assert_eq!(report.qualia, "friction of unresolved contradiction");

    let idle = scorer.observe(0, 0.0, None);
    assert_eq!(idle.qualia, "latent hum of standby");
}
