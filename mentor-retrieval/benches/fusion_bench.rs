use criterion::{criterion_group, criterion_main, Criterion};

use mentor_core::config::RetrievalConfig;
use mentor_core::models::{ProviderHit, SourceTag};
use mentor_core::traits::NoEffectiveness;
use mentor_retrieval::fuse;

fn bench_fuse(c: &mut Criterion) {
    let config = RetrievalConfig::default();
    let hits: Vec<ProviderHit> = (0..64)
        .map(|i| ProviderHit {
            text: format!("Run check {i} on module alpha before editing src/module_{i}.rs."),
            source: SourceTag::Pattern,
            confidence: 0.7,
        })
        .collect();
    let active = vec!["src/module_3.rs".to_string()];

    c.bench_function("fuse_64_hits", |b| {
        b.iter(|| {
            fuse(
                std::hint::black_box(&hits),
                "editing module alpha checks",
                &active,
                &NoEffectiveness,
                &config,
            )
        })
    });
}

criterion_group!(benches, bench_fuse);
criterion_main!(benches);
