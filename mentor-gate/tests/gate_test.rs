use std::sync::Arc;

use chrono::Duration;
use mentor_core::config::{GateConfig, SessionConfig};
use mentor_core::models::{AdviceCandidate, AdviceCategory, SourceTag, SuppressReason, TaskContext};
use mentor_core::traits::NoRiskSignal;
use mentor_core::{Phase, Score};
use mentor_gate::QualityGate;
use mentor_session::SessionTracker;

fn setup() -> (QualityGate, Arc<SessionTracker>) {
    let sessions = Arc::new(SessionTracker::new(SessionConfig::default()));
    let gate = QualityGate::new(Arc::clone(&sessions), Arc::new(NoRiskSignal));
    (gate, sessions)
}

fn strong_candidate(id: &str) -> AdviceCandidate {
    AdviceCandidate {
        id: id.to_string(),
        text: "Run the staged migration checks before applying schema changes.".to_string(),
        source: SourceTag::Constraint,
        relevance: 0.9,
        quality: 0.85,
        trust: 0.9,
        category: AdviceCategory::Process,
        score: Score::new(0.9),
    }
}

// Repeated deliveries of the same advice id within the shown TTL suppress
// the next identical candidate at the first filter step.
#[test]
fn repeat_advice_is_suppressed_as_already_shown() {
    let (gate, sessions) = setup();
    sessions.load_or_create("s1");

    // Three prior deliveries of the same advice id.
    for _ in 0..3 {
        sessions.mark_shown("s1", "adv-1");
    }

    let decisions = gate.evaluate(
        &[strong_candidate("adv-1")],
        "s1",
        "edit_file",
        &TaskContext::default(),
        Phase::Implementation,
        &GateConfig::default(),
    );

    assert_eq!(decisions[0].suppression, Some(SuppressReason::AlreadyShown));
    assert!(!decisions[0].authority.is_emittable());
}

// A tool cooldown suppresses any candidate for that tool, regardless of
// how strongly it scored.
#[test]
fn tool_cooldown_suppresses_regardless_of_score() {
    let (gate, sessions) = setup();
    sessions.load_or_create("s1");
    sessions.suppress_tool("s1", "run_tests", Duration::seconds(15));

    // First call, 1s into the cooldown window.
    let first = gate.evaluate(
        &[strong_candidate("adv-a")],
        "s1",
        "run_tests",
        &TaskContext::default(),
        Phase::Testing,
        &GateConfig::default(),
    );
    assert_eq!(first[0].suppression, Some(SuppressReason::ToolCooldown));

    // Second call shortly after, still inside the window.
    let second = gate.evaluate(
        &[strong_candidate("adv-b")],
        "s1",
        "run_tests",
        &TaskContext::default(),
        Phase::Testing,
        &GateConfig::default(),
    );
    assert_eq!(second[0].suppression, Some(SuppressReason::ToolCooldown));
}

#[test]
fn expired_shown_entry_no_longer_suppresses() {
    let config = SessionConfig {
        shown_ttl_secs: 0,
        ..Default::default()
    };
    let sessions = Arc::new(SessionTracker::new(config));
    let gate = QualityGate::new(Arc::clone(&sessions), Arc::new(NoRiskSignal));
    sessions.load_or_create("s1");
    sessions.mark_shown("s1", "adv-1");
    std::thread::sleep(std::time::Duration::from_millis(5));

    let decisions = gate.evaluate(
        &[strong_candidate("adv-1")],
        "s1",
        "edit_file",
        &TaskContext::default(),
        Phase::Implementation,
        &GateConfig::default(),
    );
    assert!(decisions[0].authority.is_emittable());
}

#[test]
fn suppression_reasons_are_specific() {
    let (gate, sessions) = setup();
    sessions.load_or_create("s1");
    sessions.mark_shown("s1", "shown");
    sessions.suppress_tool("s1", "edit_file", Duration::seconds(30));

    let decisions = gate.evaluate(
        &[strong_candidate("shown"), strong_candidate("fresh")],
        "s1",
        "edit_file",
        &TaskContext::default(),
        Phase::Implementation,
        &GateConfig::default(),
    );

    // Step 1 fires before step 2 for the shown candidate; the fresh one
    // falls to the cooldown check.
    assert_eq!(decisions[0].suppression, Some(SuppressReason::AlreadyShown));
    assert_eq!(decisions[1].suppression, Some(SuppressReason::ToolCooldown));
}
