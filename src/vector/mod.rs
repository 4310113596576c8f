//! Vector Module
//!
//! Embedding storage, cosine similarity, and top-k ranking.

mod embedding_store;
mod ranking;
mod similarity;

pub use embedding_store::{Embedding, EmbeddingStore, LoadStats, DEFAULT_DIMENSION};
pub use ranking::{checked_k, rank, Direction, RankedResult, Ranking};
pub use similarity::{cosine_similarity, magnitude};
