//! Temporal window alignment for embedding sequences.
//!
//! Given a short query sequence and a longer key sequence of fixed-width
//! frame embeddings, finds the integer offset at which a contiguous window
//! of the key best matches the query under sum-of-squared differences.
//! A pairwise difference matrix over the key is built once per call and
//! every candidate offset's score is derived from one reference difference
//! plus a matrix diagonal, so the per-offset work is squaring and
//! summation only.
//!
//! This is rigid alignment: one integer offset per call, no warping of
//! intermediate indices. Every call is an independent pure computation.

pub mod matrix;
pub mod scorer;

use matrix::DifferenceMatrix;

/// Errors produced by alignment.
#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    /// Query and key frames have different channel widths.
    #[error("dimension mismatch: query has dim {query}, key has dim {key}")]
    DimensionMismatch { query: usize, key: usize },
    /// The input sequences cannot produce a valid offset.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Find the offset of the best-matching window of `key` for `query`.
///
/// The shorter sequence always plays the query role; if `key` has fewer
/// frames than `query` the roles are swapped and the returned offset
/// indexes into the longer sequence. The result lies in `[0, n - m]`
/// where n and m are the resolved key and query lengths.
///
/// Ties between offsets resolve to the lowest index.
pub fn align(
    query: &walign_core::SequenceEmbedding,
    key: &walign_core::SequenceEmbedding,
) -> Result<usize, AlignError> {
    Ok(align_with_scores(query, key)?.offset)
}

/// Diagnostic variant of [`align`] that also returns the score for every
/// candidate offset.
pub fn align_with_scores(
    query: &walign_core::SequenceEmbedding,
    key: &walign_core::SequenceEmbedding,
) -> Result<walign_core::Alignment, AlignError> {
    // Empty cases first, before the dimension check.
    if query.embeddings.is_empty() || key.embeddings.is_empty() {
        return Err(AlignError::InvalidInput(
            "cannot align an empty sequence".to_string(),
        ));
    }

    if query.dim != key.dim {
        return Err(AlignError::DimensionMismatch {
            query: query.dim,
            key: key.dim,
        });
    }

    // The shorter sequence always plays the query role so that every
    // candidate window fits inside the key.
    let (query, key) = if key.num_frames() < query.num_frames() {
        tracing::warn!(
            query_frames = query.num_frames(),
            key_frames = key.num_frames(),
            "key is shorter than query, swapping roles"
        );
        (key, query)
    } else {
        (query, key)
    };

    let m = query.num_frames();
    let n = key.num_frames();
    // The scorer requires m <= n; cannot happen once roles are resolved.
    if m > n {
        return Err(AlignError::InvalidInput(format!(
            "query has {m} frames but key has only {n}"
        )));
    }

    let matrix = DifferenceMatrix::build(&key.embeddings, key.dim);
    let scores = scorer::score_windows(&query.embeddings, &key.embeddings, &matrix);
    let offset = argmin(&scores);

    Ok(walign_core::Alignment { offset, scores })
}

/// Align each query in a batch against the same key.
///
/// Items are mutually independent; the first failing item aborts the
/// batch.
pub fn align_batch(
    queries: &[walign_core::SequenceEmbedding],
    key: &walign_core::SequenceEmbedding,
) -> Result<Vec<usize>, AlignError> {
    queries.iter().map(|query| align(query, key)).collect()
}

/// Index of the smallest score, lowest index on ties.
fn argmin(scores: &[f32]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        // Strict less-than keeps the earliest offset on ties.
        if score < scores[best] {
            best = i;
        }
    }
    best
}
