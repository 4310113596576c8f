//! WORDSIM - Word Similarity Search
//!
//! Finds the words closest to (or furthest from) a query word among a set of
//! pre-computed word embeddings, ranked by cosine similarity.

pub mod config;
pub mod error;
pub mod metrics;
pub mod output;
pub mod session;
pub mod vector;

pub use config::Config;
pub use error::{LoadError, OutputError, RankError, SessionError};
pub use metrics::Metrics;
pub use session::Session;
pub use vector::{Direction, Embedding, EmbeddingStore, RankedResult, Ranking};
