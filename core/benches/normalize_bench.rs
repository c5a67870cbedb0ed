use criterion::{criterion_group, criterion_main, Criterion};
use vicinity_core::normalize::Normalizer;

const SAMPLE: &str = "The quick brown fox jumped over the lazy dog while \
running through fields of tall grass, chasing rabbits and ignoring the \
farmer's repeated, increasingly loud warnings about trespassing.";

fn bench_normalize(c: &mut Criterion) {
    let normalizer = Normalizer::new();
    let text = SAMPLE.repeat(50);
    c.bench_function("normalize_sample", |b| b.iter(|| normalizer.normalize(&text)));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
