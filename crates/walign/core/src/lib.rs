//! Core types for walign.

/// A frame embedding - a vector of floats representing a single time step.
pub type FrameEmbedding = Vec<f32>;

/// A sequence's embedding - a matrix where each row is one frame embedding.
/// This is the representation an upstream motion encoder produces: one
/// fixed-width vector per time step.
#[derive(Debug, Clone)]
pub struct SequenceEmbedding {
    /// The embeddings for each frame in the sequence.
    /// Shape: [num_frames, embedding_dim]
    pub embeddings: Vec<FrameEmbedding>,
    /// The dimensionality of each embedding vector.
    pub dim: usize,
}

impl SequenceEmbedding {
    /// Create a new sequence embedding.
    pub fn new(embeddings: Vec<FrameEmbedding>, dim: usize) -> Self {
        Self { embeddings, dim }
    }

    /// Number of frames in this sequence.
    pub fn num_frames(&self) -> usize {
        self.embeddings.len()
    }
}

/// The result of aligning a query sequence against a key sequence.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// Start index into the key where the best-matching window begins.
    pub offset: usize,
    /// Sum-of-squared-differences score for every candidate offset.
    /// `scores[i]` is the score of the window starting at key frame `i`.
    pub scores: Vec<f32>,
}
