//! Benchmarks for window alignment.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn random_sequence(num_frames: usize, dim: usize) -> walign_core::SequenceEmbedding {
    let embeddings: Vec<Vec<f32>> = (0..num_frames)
        .map(|i| (0..dim).map(|j| ((i * dim + j) as f32).sin()).collect())
        .collect();
    walign_core::SequenceEmbedding::new(embeddings, dim)
}

fn bench_align(c: &mut Criterion) {
    let query = random_sequence(32, 512); // Typical query length
    let key = random_sequence(256, 512); // Typical key length

    c.bench_function("align_32x256_dim512", |b| {
        b.iter(|| walign_engine::align(black_box(&query), black_box(&key)).unwrap())
    });

    c.bench_function("score_naive_32x256_dim512", |b| {
        b.iter(|| {
            walign_engine::scorer::score_windows_naive(
                black_box(&query.embeddings),
                black_box(&key.embeddings),
            )
        })
    });

    // Matrix construction dominates the optimized path; measure it alone.
    c.bench_function("matrix_build_256_dim512", |b| {
        b.iter(|| {
            walign_engine::matrix::DifferenceMatrix::build(black_box(&key.embeddings), key.dim)
        })
    });

    let short_query = random_sequence(8, 512);
    let short_key = random_sequence(64, 512);

    c.bench_function("align_8x64_dim512", |b| {
        b.iter(|| walign_engine::align(black_box(&short_query), black_box(&short_key)).unwrap())
    });
}

criterion_group!(benches, bench_align);
criterion_main!(benches);
