use mentor_core::models::{
    AdviceCandidate, AdvisoryPacket, Authority, PacketKey, Plane, Score, SourceTag,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn score_always_in_unit_interval(raw in -10.0f64..10.0) {
        let s = Score::new(raw);
        prop_assert!((0.0..=1.0).contains(&s.value()));
    }

    #[test]
    fn advice_id_is_deterministic(text in "[a-z ]{1,60}") {
        let a = AdviceCandidate::compute_id(&text, SourceTag::Insight);
        let b = AdviceCandidate::compute_id(&text, SourceTag::Insight);
        prop_assert_eq!(a, b);
    }
}

#[test]
fn packet_fingerprint_tracks_text() {
    let key = PacketKey::new("s", "bash", "run", Plane::PreTool);
    let a = AdvisoryPacket::new(key.clone(), "one".to_string(), Authority::Note, vec![], 600);
    let b = AdvisoryPacket::new(key, "two".to_string(), Authority::Note, vec![], 600);
    assert_ne!(a.fingerprint, b.fingerprint);
    assert_eq!(a.fingerprint, AdvisoryPacket::fingerprint_text("one"));
}

#[test]
fn authority_serializes_snake_case() {
    let json = serde_json::to_string(&Authority::Warning).unwrap();
    assert_eq!(json, "\"warning\"");
}
