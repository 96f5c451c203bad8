//! Aligned-feature extraction on top of window alignment.
//!
//! Once an offset is known, downstream consumers want the matching window
//! itself, the per-frame residual between the query and that window, and a
//! way to bring residuals of different lengths onto a common grid.

use walign_engine::AlignError;

/// Slice the aligned window out of the key sequence.
///
/// Returns `key[offset .. offset + len]`, truncated at the end of the key
/// when the requested window runs past it.
pub fn extract_window(
    key: &walign_core::SequenceEmbedding,
    offset: usize,
    len: usize,
) -> walign_core::SequenceEmbedding {
    let end = (offset + len).min(key.num_frames());
    let start = offset.min(end);
    walign_core::SequenceEmbedding::new(key.embeddings[start..end].to_vec(), key.dim)
}

/// Per-frame difference between the query and its aligned key window.
///
/// Frame t of the result is `query[t] - key[offset + t]`. The overlap runs
/// for `min(query_len, key_len - offset)` frames: a query that extends past
/// the end of the key contributes only the frames the key can cover.
pub fn alignment_residual(
    query: &walign_core::SequenceEmbedding,
    key: &walign_core::SequenceEmbedding,
    offset: usize,
) -> Result<walign_core::SequenceEmbedding, AlignError> {
    if query.dim != key.dim {
        return Err(AlignError::DimensionMismatch {
            query: query.dim,
            key: key.dim,
        });
    }
    if offset >= key.num_frames() {
        return Err(AlignError::InvalidInput(format!(
            "offset {offset} is out of range for a key of {} frames",
            key.num_frames()
        )));
    }

    let overlap = query.num_frames().min(key.num_frames() - offset);
    let residual = (0..overlap)
        .map(|t| {
            query.embeddings[t]
                .iter()
                .zip(key.embeddings[offset + t].iter())
                .map(|(q, k)| q - k)
                .collect()
        })
        .collect();

    Ok(walign_core::SequenceEmbedding::new(residual, query.dim))
}

/// Linearly resample a sequence onto a uniform grid of `target_len` frames.
///
/// Endpoints are preserved; interior frames interpolate between their two
/// nearest source frames. A single-frame input repeats its only frame and
/// an empty input or a zero target yields an empty sequence.
pub fn resample_linear(
    seq: &walign_core::SequenceEmbedding,
    target_len: usize,
) -> walign_core::SequenceEmbedding {
    let len = seq.num_frames();
    if len == 0 || target_len == 0 {
        return walign_core::SequenceEmbedding::new(Vec::new(), seq.dim);
    }
    if len == 1 || target_len == 1 {
        return walign_core::SequenceEmbedding::new(
            vec![seq.embeddings[0].clone(); target_len],
            seq.dim,
        );
    }

    let embeddings = (0..target_len)
        .map(|i| {
            let pos = i as f32 * (len - 1) as f32 / (target_len - 1) as f32;
            let lo = (pos.floor() as usize).min(len - 1);
            let hi = (lo + 1).min(len - 1);
            let ratio = pos - lo as f32;
            seq.embeddings[lo]
                .iter()
                .zip(seq.embeddings[hi].iter())
                .map(|(a, b)| a + ratio * (b - a))
                .collect()
        })
        .collect();

    walign_core::SequenceEmbedding::new(embeddings, seq.dim)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence_1d(values: &[f32]) -> walign_core::SequenceEmbedding {
        walign_core::SequenceEmbedding::new(values.iter().map(|&v| vec![v]).collect(), 1)
    }

    #[test]
    fn test_extract_window() {
        let key = sequence_1d(&[0.0, 1.0, 2.0, 3.0, 4.0]);

        let window = extract_window(&key, 2, 2);
        assert_eq!(window.embeddings, vec![vec![2.0], vec![3.0]]);
        assert_eq!(window.dim, 1);
    }

    #[test]
    fn test_extract_window_truncates_at_end() {
        let key = sequence_1d(&[0.0, 1.0, 2.0]);

        let window = extract_window(&key, 2, 5);
        assert_eq!(window.embeddings, vec![vec![2.0]]);

        let past_end = extract_window(&key, 7, 2);
        assert_eq!(past_end.num_frames(), 0);
    }

    #[test]
    fn test_residual_query_within_key() {
        let query = sequence_1d(&[2.5, 3.5]);
        let key = sequence_1d(&[0.0, 1.0, 2.0, 3.0, 4.0]);

        // query[t] - key[2 + t]: [2.5 - 2, 3.5 - 3]
        let residual = alignment_residual(&query, &key, 2).unwrap();
        assert_eq!(residual.embeddings, vec![vec![0.5], vec![0.5]]);
    }

    #[test]
    fn test_residual_clamped_to_key_end() {
        // Three query frames but only two key frames remain after the
        // offset, so the overlap stops at the key's end.
        let query = sequence_1d(&[5.0, 6.0, 7.0]);
        let key = sequence_1d(&[0.0, 1.0, 2.0, 3.0]);

        let residual = alignment_residual(&query, &key, 2).unwrap();
        assert_eq!(residual.embeddings, vec![vec![3.0], vec![3.0]]);
    }

    #[test]
    fn test_residual_rejects_out_of_range_offset() {
        let query = sequence_1d(&[1.0]);
        let key = sequence_1d(&[1.0, 2.0]);

        assert!(matches!(
            alignment_residual(&query, &key, 2).unwrap_err(),
            AlignError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_residual_dimension_mismatch() {
        let query = walign_core::SequenceEmbedding::new(vec![vec![1.0, 2.0]], 2);
        let key = sequence_1d(&[1.0, 2.0]);

        assert!(matches!(
            alignment_residual(&query, &key, 0).unwrap_err(),
            AlignError::DimensionMismatch { query: 2, key: 1 }
        ));
    }

    #[test]
    fn test_resample_identity_at_same_length() {
        let seq = sequence_1d(&[0.0, 1.0, 2.0]);

        let resampled = resample_linear(&seq, 3);
        assert_eq!(resampled.embeddings, seq.embeddings);
    }

    #[test]
    fn test_resample_upsamples_midpoints() {
        let seq = sequence_1d(&[0.0, 2.0]);

        // Five output frames over one source step: 0, 0.5, 1, 1.5, 2.
        let resampled = resample_linear(&seq, 5);
        assert_eq!(
            resampled.embeddings,
            vec![vec![0.0], vec![0.5], vec![1.0], vec![1.5], vec![2.0]]
        );
    }

    #[test]
    fn test_resample_downsamples_endpoints() {
        let seq = sequence_1d(&[0.0, 1.0, 2.0, 3.0, 4.0]);

        let resampled = resample_linear(&seq, 3);
        assert_eq!(
            resampled.embeddings,
            vec![vec![0.0], vec![2.0], vec![4.0]]
        );
    }

    #[test]
    fn test_resample_single_frame_repeats() {
        let seq = sequence_1d(&[7.0]);

        let resampled = resample_linear(&seq, 4);
        assert_eq!(resampled.embeddings, vec![vec![7.0]; 4]);
    }

    #[test]
    fn test_resample_empty() {
        let seq = sequence_1d(&[]);
        assert_eq!(resample_linear(&seq, 3).num_frames(), 0);

        let seq = sequence_1d(&[1.0, 2.0]);
        assert_eq!(resample_linear(&seq, 0).num_frames(), 0);
    }
}
