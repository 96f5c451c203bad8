//! CLI for temporal window alignment.

// CLI binaries need to print user-facing output
#![allow(
    clippy::print_stdout,
    reason = "CLI binary needs stdout for user output"
)]

use eyre::WrapErr as _;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.command {
        Command::Align {
            query,
            key,
            scores,
            json,
        } => {
            align(&query, &key, scores, json)?;
        }
        Command::Residual {
            query,
            key,
            resample,
            json,
        } => {
            residual(&query, &key, resample, json)?;
        }
    }

    Ok(())
}

use clap::Parser as _;

#[derive(clap::Parser)]
#[command(name = "walign")]
#[command(about = "Temporal alignment - find the best-matching window of a key sequence")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Align a query sequence against a key sequence
    Align {
        /// Path to the query sequence (JSON array of frame vectors)
        query: std::path::PathBuf,

        /// Path to the key sequence (JSON array of frame vectors)
        key: std::path::PathBuf,

        /// Print the score of every candidate offset
        #[arg(long)]
        scores: bool,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Emit per-frame residual features for the aligned window
    Residual {
        /// Path to the query sequence (JSON array of frame vectors)
        query: std::path::PathBuf,

        /// Path to the key sequence (JSON array of frame vectors)
        key: std::path::PathBuf,

        /// Resample the residual to this many frames
        #[arg(long)]
        resample: Option<usize>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

/// Load a sequence from a JSON file holding an array of frame vectors.
fn load_sequence(path: &std::path::Path) -> eyre::Result<walign_core::SequenceEmbedding> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read sequence from {path:?}"))?;

    let frames: Vec<Vec<f32>> = serde_json::from_str(&content)
        .wrap_err_with(|| format!("failed to parse sequence JSON in {path:?}"))?;

    if frames.is_empty() {
        eyre::bail!("sequence in {path:?} is empty");
    }

    let dim = frames[0].len();
    if let Some(bad) = frames.iter().position(|f| f.len() != dim) {
        eyre::bail!(
            "frame {bad} in {path:?} has width {}, expected {dim}",
            frames[bad].len()
        );
    }

    Ok(walign_core::SequenceEmbedding::new(frames, dim))
}

/// JSON output for an alignment.
#[derive(serde::Serialize)]
struct JsonAlignment {
    offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    scores: Option<Vec<f32>>,
}

fn align(
    query_path: &std::path::Path,
    key_path: &std::path::Path,
    scores: bool,
    json: bool,
) -> eyre::Result<()> {
    let query = load_sequence(query_path)?;
    let key = load_sequence(key_path)?;

    tracing::debug!(
        query_frames = query.num_frames(),
        key_frames = key.num_frames(),
        dim = query.dim,
        "aligning"
    );

    let alignment = walign_engine::align_with_scores(&query, &key).wrap_err("alignment failed")?;

    if json {
        let result = JsonAlignment {
            offset: alignment.offset,
            scores: scores.then_some(alignment.scores),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&result).wrap_err("failed to serialize JSON")?
        );
    } else {
        println!("offset: {}", alignment.offset);
        if scores {
            for (i, score) in alignment.scores.iter().enumerate() {
                println!("{i}: {score:.4}");
            }
        }
    }

    Ok(())
}

fn residual(
    query_path: &std::path::Path,
    key_path: &std::path::Path,
    resample: Option<usize>,
    json: bool,
) -> eyre::Result<()> {
    let query = load_sequence(query_path)?;
    let key = load_sequence(key_path)?;

    let offset = walign_engine::align(&query, &key).wrap_err("alignment failed")?;

    // Resolve roles the same way the engine does: the shorter sequence is
    // the query, and the offset indexes into the longer one.
    let (query, key) = if key.num_frames() < query.num_frames() {
        (&key, &query)
    } else {
        (&query, &key)
    };

    let mut features = walign_feature::alignment_residual(query, key, offset)
        .wrap_err("failed to compute residual")?;

    if let Some(target_len) = resample {
        features = walign_feature::resample_linear(&features, target_len);
    }

    tracing::debug!(
        offset,
        frames = features.num_frames(),
        dim = features.dim,
        "residual computed"
    );

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&features.embeddings)
                .wrap_err("failed to serialize JSON")?
        );
    } else {
        for frame in &features.embeddings {
            let line: Vec<String> = frame.iter().map(|v| format!("{v:.4}")).collect();
            println!("{}", line.join(" "));
        }
    }

    Ok(())
}
