//! Align a noisy slice of a synthetic motion sequence against the full
//! sequence and report where it lands.

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let dim = 64;
    let key_frames = 120;
    let window_start = 47;
    let window_len = 18;

    // A smooth synthetic key sequence.
    let key_embeddings: Vec<Vec<f32>> = (0..key_frames)
        .map(|i| {
            (0..dim)
                .map(|j| ((i as f32) * 0.1 + (j as f32) * 0.7).sin())
                .collect()
        })
        .collect();
    let key = walign_core::SequenceEmbedding::new(key_embeddings, dim);

    // The query is a window of the key with small deterministic noise.
    let query_embeddings: Vec<Vec<f32>> = key.embeddings
        [window_start..window_start + window_len]
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            frame
                .iter()
                .enumerate()
                .map(|(j, v)| v + 0.01 * ((i * dim + j) as f32).cos())
                .collect()
        })
        .collect();
    let query = walign_core::SequenceEmbedding::new(query_embeddings, dim);

    tracing::info!(
        key_frames = key.num_frames(),
        query_frames = query.num_frames(),
        dim,
        "Aligning query against key..."
    );

    let alignment = walign_engine::align_with_scores(&query, &key)?;

    tracing::info!(
        offset = alignment.offset,
        expected = window_start,
        best_score = alignment.scores[alignment.offset],
        "Alignment complete"
    );

    // Show the score landscape around the chosen offset.
    let lo = alignment.offset.saturating_sub(3);
    let hi = (alignment.offset + 4).min(alignment.scores.len());
    for (i, score) in alignment.scores[lo..hi].iter().enumerate() {
        tracing::info!(offset = lo + i, score, "candidate");
    }

    Ok(())
}
