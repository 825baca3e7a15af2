use chrono::Utc;
use mentor_cache::PacketStore;
use mentor_core::config::CacheConfig;
use mentor_core::models::{AdviceItem, AdvisoryPacket, Authority, PacketKey, Plane, SourceTag};
use proptest::prelude::*;

fn packet(session: &str, tool: &str, text: &str, item_text: &str) -> AdvisoryPacket {
    AdvisoryPacket::new(
        PacketKey::new(session, tool, "modify", Plane::PreTool),
        text.to_string(),
        Authority::Note,
        vec![AdviceItem {
            advice_id: "a1".to_string(),
            text: item_text.to_string(),
            source: SourceTag::Pattern,
            score: 0.7,
        }],
        600,
    )
}

#[test]
fn exact_lookup_round_trips_byte_identical_text() {
    let store = PacketStore::new();
    let config = CacheConfig::default();
    let text = "When editing src/lib.rs: run `cargo fmt`. Because the CI checks formatting.";
    let p = packet("s1", "edit_file", text, "item");
    let key = p.key.clone();
    store.store(p, &config);

    let hit = store.lookup(&key, &config).expect("exact hit");
    assert!(!hit.relaxed);
    assert_eq!(hit.packet.text, text);
}

#[test]
fn expired_packet_is_skipped_and_evicted_lazily() {
    let store = PacketStore::new();
    let config = CacheConfig::default();
    let mut p = packet("s1", "edit_file", "text", "item");
    p.created_at = Utc::now() - chrono::Duration::seconds(10_000);
    let key = p.key.clone();
    store.store(p, &config);

    assert!(store.lookup(&key, &config).is_none());
    assert_eq!(store.len(), 0, "expired row removed on sight");
}

#[test]
fn relaxed_lookup_matches_same_tool_other_session() {
    let store = PacketStore::new();
    let config = CacheConfig::default();
    let p = packet("s1", "edit_file", "advice text", "item");
    store.store(p, &config);

    let wanted = PacketKey::new("s2", "edit_file", "modify", Plane::PreTool);
    let hit = store.lookup(&wanted, &config).expect("relaxed hit");
    assert!(hit.relaxed);
}

#[test]
fn relaxed_lookup_rejects_unrelated_tool() {
    let store = PacketStore::new();
    let config = CacheConfig::default();
    store.store(packet("s1", "edit_file", "advice", "item"), &config);

    let wanted = PacketKey::new("s9", "deploy", "release", Plane::PostTool);
    assert!(store.lookup(&wanted, &config).is_none());
}

// Invalidation matches the full record, not index metadata. The hint
// appears only inside the synthesized text of one packet.
#[test]
fn invalidation_matches_full_text_not_metadata() {
    let store = PacketStore::new();
    let config = CacheConfig::default();
    let referencing = packet(
        "s1",
        "edit_file",
        "When touching lib/x.py: mind the import cycle.",
        "unrelated item",
    );
    let referencing_id = referencing.id.clone();
    let other = packet("s2", "run_tests", "General testing advice.", "unrelated");
    store.store(referencing, &config);
    store.store(other, &config);

    let invalidated = store.invalidate_packets("lib/x.py");
    assert_eq!(invalidated, vec![referencing_id]);
    assert_eq!(store.len(), 1);
}

#[test]
fn invalidation_matches_hint_in_stored_items() {
    let store = PacketStore::new();
    let config = CacheConfig::default();
    let p = packet(
        "s1",
        "edit_file",
        "Generic advisory text.",
        "lib/x.py holds the schema definitions",
    );
    store.store(p, &config);

    assert_eq!(store.invalidate_packets("lib/x.py").len(), 1);
    assert!(store.is_empty());
}

// Scenario C: helpful=false with followed=false still moves unhelpful.
#[test]
fn feedback_counts_without_follow_through() {
    let store = PacketStore::new();
    let config = CacheConfig::default();
    let p = packet("s1", "edit_file", "text", "item");
    let id = p.id.clone();
    store.store(p, &config);
    store.record_delivery(&id);

    assert!(store.record_feedback(&id, Some(false), Some(false)));
    let snap = store.effectiveness_of(&id).unwrap();
    assert_eq!(snap.unhelpful, 1);
    assert_eq!(snap.delivered, 1);
}

#[test]
fn feedback_for_evicted_packet_is_a_noop() {
    let store = PacketStore::new();
    assert!(!store.record_feedback("missing", Some(true), None));
}

#[test]
fn feedback_by_advice_id_reaches_carrying_packets() {
    let store = PacketStore::new();
    let config = CacheConfig::default();
    let p = packet("s1", "edit_file", "text", "item");
    let id = p.id.clone();
    store.store(p, &config);

    assert_eq!(store.record_feedback_by_advice("a1", Some(true), None), 1);
    assert_eq!(store.record_feedback_by_advice("unknown", Some(true), None), 0);
    assert_eq!(store.effectiveness_of(&id).unwrap().helpful, 1);
}

#[test]
fn capacity_cap_evicts_least_effective() {
    let store = PacketStore::new();
    let config = CacheConfig {
        capacity: 2,
        ..Default::default()
    };
    let bad = packet("s1", "tool_a", "bad advice", "item");
    let bad_id = bad.id.clone();
    let good = packet("s2", "tool_b", "good advice", "item");
    let good_id = good.id.clone();
    store.store(bad, &config);
    store.store(good, &config);

    store.record_delivery(&bad_id);
    store.record_feedback(&bad_id, Some(false), None);
    store.record_delivery(&good_id);
    store.record_feedback(&good_id, Some(true), None);

    store.store(packet("s3", "tool_c", "new advice", "item"), &config);
    assert_eq!(store.len(), 2);
    assert!(store.effectiveness_of(&bad_id).is_none(), "worst row evicted");
    assert!(store.effectiveness_of(&good_id).is_some());
}

proptest! {
    // Counters are monotone and votes never exceed deliveries, under any
    // interleaving of deliveries and feedback.
    #[test]
    fn counter_invariant_holds(ops in proptest::collection::vec(0u8..4, 1..40)) {
        let store = PacketStore::new();
        let config = CacheConfig::default();
        let p = packet("s1", "edit_file", "text", "item");
        let id = p.id.clone();
        store.store(p, &config);

        let mut last_voted = 0;
        for op in ops {
            match op {
                0 => store.record_delivery(&id),
                1 => { store.record_feedback(&id, Some(true), Some(true)); }
                2 => { store.record_feedback(&id, Some(false), Some(false)); }
                _ => { store.record_feedback(&id, None, Some(true)); }
            }
            let snap = store.effectiveness_of(&id).unwrap();
            let voted = snap.helpful + snap.unhelpful;
            prop_assert!(voted <= snap.delivered);
            prop_assert!(voted >= last_voted);
            last_voted = voted;
        }
    }
}
