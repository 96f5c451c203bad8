//! Window scoring via difference reuse.
//!
//! For each candidate offset i, the windowed difference decomposes as
//! `key[t + i] - query[t] = (key[t + i] - key[t]) + (key[t] - query[t])`.
//! The first term is a diagonal of the precomputed matrix and the second
//! is the offset-0 difference, so only offset 0 ever touches the query.
//! Squaring happens after the additive reconstruction, which is why the
//! identity is exact for sum-of-squares and does not carry over to metrics
//! applied before the sum.

use crate::matrix::DifferenceMatrix;

/// Score every candidate window of `key` against `query`.
///
/// Returns one sum-of-squared-differences score per start offset,
/// `n - m + 1` in total. Offset 0 is computed directly from the raw
/// sequences; every later offset combines that base difference with the
/// matrix diagonal for its separation.
///
/// Callers guarantee `1 <= query.len() <= key.len()`, matching channel
/// widths, and that `matrix` was built over this `key`.
pub fn score_windows(
    query: &[Vec<f32>],
    key: &[Vec<f32>],
    matrix: &DifferenceMatrix,
) -> Vec<f32> {
    let n = key.len();
    let m = query.len();

    // The one direct pass over raw data. Kept signed: the reconstruction
    // needs the unsquared values.
    let base: Vec<Vec<f32>> = key[..m]
        .iter()
        .zip(query.iter())
        .map(|(k, q)| k.iter().zip(q.iter()).map(|(a, b)| a - b).collect())
        .collect();

    let mut scores = Vec::with_capacity(n - m + 1);
    scores.push(
        base.iter()
            .map(|row| row.iter().map(|x| x * x).sum::<f32>())
            .sum(),
    );

    for i in 1..=(n - m) {
        let score = matrix
            .diagonal(i)
            .take(m)
            .zip(base.iter())
            .map(|(diag, base_t)| {
                diag.iter()
                    .zip(base_t.iter())
                    .map(|(d, b)| (d + b) * (d + b))
                    .sum::<f32>()
            })
            .sum();
        scores.push(score);
    }

    scores
}

/// Brute-force reference scorer.
///
/// Recomputes the full windowed difference for every candidate offset,
/// O(n * m) vector differences in total. The differential tests and the
/// benchmark pit `score_windows` against this.
pub fn score_windows_naive(query: &[Vec<f32>], key: &[Vec<f32>]) -> Vec<f32> {
    let n = key.len();
    let m = query.len();

    (0..=n - m)
        .map(|i| {
            query
                .iter()
                .enumerate()
                .map(|(t, q)| {
                    key[i + t]
                        .iter()
                        .zip(q.iter())
                        .map(|(a, b)| (a - b) * (a - b))
                        .sum::<f32>()
                })
                .sum()
        })
        .collect()
}
