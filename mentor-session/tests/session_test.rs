use chrono::{Duration, Utc};
use mentor_core::config::SessionConfig;
use mentor_core::Phase;
use mentor_session::{cleanup_stale_sessions, SessionState, SessionTracker};
use proptest::prelude::*;
use serde_json::json;

fn tracker() -> SessionTracker {
    SessionTracker::new(SessionConfig::default())
}

#[test]
fn phase_follows_tool_signal() {
    let t = tracker();
    t.load_or_create("s1");
    for _ in 0..3 {
        t.record_tool_call("s1", "grep", &json!({"pattern": "foo"}));
    }
    assert_eq!(t.phase("s1"), Phase::Exploration);

    for _ in 0..4 {
        t.record_tool_call("s1", "edit_file", &json!({"file_path": "src/a.rs"}));
    }
    assert_eq!(t.phase("s1"), Phase::Implementation);
}

#[test]
fn two_failures_force_debugging() {
    let t = tracker();
    t.record_tool_call("s1", "grep", &json!({}));
    t.record_outcome("s1", false);
    assert_ne!(t.phase("s1"), Phase::Debugging);
    t.record_outcome("s1", false);
    assert_eq!(t.phase("s1"), Phase::Debugging);
    // A success clears the override.
    t.record_outcome("s1", true);
    assert_ne!(t.phase("s1"), Phase::Debugging);
}

#[test]
fn shown_ledger_is_per_session() {
    let t = tracker();
    t.load_or_create("s1");
    t.load_or_create("s2");
    t.mark_shown("s1", "advice-1");
    assert!(t.is_shown("s1", "advice-1"));
    assert!(!t.is_shown("s2", "advice-1"));
}

#[test]
fn tool_cooldown_suppresses_then_expires() {
    let t = tracker();
    t.load_or_create("s1");
    t.suppress_tool("s1", "bash", Duration::seconds(15));
    assert!(t.is_suppressed("s1", "bash"));
    t.suppress_tool("s1", "bash", Duration::seconds(-1));
    assert!(!t.is_suppressed("s1", "bash"));
}

#[test]
fn unknown_session_is_fresh_not_error() {
    let t = tracker();
    assert!(!t.is_shown("missing", "a"));
    assert!(!t.is_suppressed("missing", "bash"));
    assert_eq!(t.phase("missing"), Phase::Exploration);
    let state = t.load_or_create("missing");
    assert_eq!(state.session_id, "missing");
}

proptest! {
    // An expired ledger entry is never honored as "already shown,"
    // whatever the entry's age or the configured TTL.
    #[test]
    fn expired_shown_entries_are_never_honored(age_secs in 0i64..2000, ttl_secs in 1u64..1000) {
        let mut state = SessionState::new("s".to_string());
        state
            .shown
            .insert("a1".to_string(), Utc::now() - Duration::seconds(age_secs));
        let honored = state.is_shown("a1", ttl_secs);
        if age_secs > ttl_secs as i64 {
            prop_assert!(!honored);
        } else if age_secs < ttl_secs as i64 {
            prop_assert!(honored);
        }
    }
}

#[test]
fn stale_sessions_are_swept() {
    let config = SessionConfig {
        session_ttl_secs: 0,
        ..Default::default()
    };
    let t = SessionTracker::new(config);
    t.load_or_create("old");
    std::thread::sleep(std::time::Duration::from_millis(5));
    let removed = cleanup_stale_sessions(&t);
    assert_eq!(removed, 1);
    assert_eq!(t.session_count(), 0);
}
