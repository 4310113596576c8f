//! Embedding Store
//!
//! Word to fixed-dimension vector mapping, parsed from a text source with one
//! `word, v1, v2, ..., vD` record per line.

use hashbrown::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::LoadError;

/// Vector dimension used when none is configured
pub const DEFAULT_DIMENSION: usize = 50;

/// A word and its embedding vector
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub word: String,
    pub vector: Vec<f64>,
}

impl Embedding {
    pub fn new(word: impl Into<String>, vector: Vec<f64>) -> Self {
        Self {
            word: word.into(),
            vector,
        }
    }

    /// Get embedding dimension
    pub fn dim(&self) -> usize {
        self.vector.len()
    }
}

/// Renders the record in source format, so a store can be written back out
/// and reloaded.
impl fmt::Display for Embedding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word)?;
        for component in &self.vector {
            write!(f, ", {}", component)?;
        }
        Ok(())
    }
}

/// Counters from the load that produced a store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read, blank ones included
    pub lines: usize,
    /// Distinct words stored
    pub embeddings: usize,
    /// Lines with fewer than D components (zero-padded)
    pub padded: usize,
    /// Lines with more than D components (extras dropped)
    pub truncated: usize,
    /// Lines whose word replaced an earlier line's
    pub duplicates: usize,
    pub skipped_blank: usize,
}

/// In-memory word embedding store
///
/// Every stored vector has exactly `dimension` components. Words are
/// lowercased on insert and on lookup. A repeated word replaces the earlier
/// entry (last write wins).
#[derive(Debug, Clone)]
pub struct EmbeddingStore {
    embeddings: HashMap<String, Embedding>,
    dimension: usize,
    stats: LoadStats,
}

impl Default for EmbeddingStore {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl EmbeddingStore {
    /// Create a new, empty store
    pub fn new(dimension: usize) -> Self {
        Self {
            embeddings: HashMap::new(),
            dimension,
            stats: LoadStats::default(),
        }
    }

    /// Load a store from a file
    pub fn load_path(path: impl AsRef<Path>, dimension: usize) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::IoFailure(e),
        })?;

        debug!("Loading embeddings from {}", path.display());
        Self::load(BufReader::new(file), dimension)
    }

    /// Load a store from any line-oriented reader
    ///
    /// The load is all-or-nothing: the first malformed line aborts it with
    /// [`LoadError::MalformedLine`] and no store is produced. Blank lines are
    /// skipped.
    pub fn load<R: BufRead>(reader: R, dimension: usize) -> Result<Self, LoadError> {
        let mut store = Self::new(dimension);
        let mut stats = LoadStats::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            stats.lines += 1;

            if line.trim().is_empty() {
                stats.skipped_blank += 1;
                continue;
            }

            let (word, components) = parse_line(&line, line_no)?;

            match components.len().cmp(&dimension) {
                std::cmp::Ordering::Less => stats.padded += 1,
                std::cmp::Ordering::Greater => stats.truncated += 1,
                std::cmp::Ordering::Equal => {}
            }

            if store.insert(word, &components) {
                stats.duplicates += 1;
            }
        }

        stats.embeddings = store.len();
        store.stats = stats;

        info!(
            "Loaded {} embeddings (dimension {}) from {} lines",
            stats.embeddings, dimension, stats.lines
        );
        if stats.padded > 0 || stats.truncated > 0 {
            warn!(
                "{} lines zero-padded and {} lines truncated to dimension {}",
                stats.padded, stats.truncated, dimension
            );
        }
        if stats.duplicates > 0 {
            warn!("{} duplicate words replaced earlier entries", stats.duplicates);
        }

        Ok(store)
    }

    /// Insert a word, fitting `components` to the store dimension.
    ///
    /// Missing trailing components become `0.0`; extra ones are dropped.
    /// Returns `true` if an existing entry for the word was replaced.
    pub fn insert(&mut self, word: &str, components: &[f64]) -> bool {
        let word = word.trim().to_lowercase();
        let mut vector = vec![0.0; self.dimension];
        for (slot, value) in vector.iter_mut().zip(components) {
            *slot = *value;
        }

        let embedding = Embedding::new(word.clone(), vector);
        self.embeddings.insert(word, embedding).is_some()
    }

    /// Check if word exists
    pub fn contains(&self, word: &str) -> bool {
        self.embeddings.contains_key(normalize(word).as_str())
    }

    /// Get the embedding for a word
    pub fn get(&self, word: &str) -> Option<&Embedding> {
        self.embeddings.get(normalize(word).as_str())
    }

    /// Iterate over all embeddings in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &Embedding> {
        self.embeddings.values()
    }

    /// Get all words, sorted
    pub fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.embeddings.keys().map(String::as_str).collect();
        words.sort_unstable();
        words
    }

    /// Get embedding dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get number of stored embeddings
    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }

    /// Counters from the load that built this store
    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Split a record into its word and numeric components.
///
/// Fields are separated by `", "`, so a word may itself contain commas
/// (`","`, `"1,000"`). Every component is validated, including ones beyond
/// the store dimension.
fn parse_line(line: &str, line_no: usize) -> Result<(&str, Vec<f64>), LoadError> {
    let line = line.trim_end_matches('\r');
    let mut fields = line.split(", ");

    let word = fields.next().unwrap_or_default().trim();
    if word.is_empty() {
        return Err(LoadError::MalformedLine {
            line: line_no,
            reason: "missing word".to_string(),
        });
    }

    let components = fields
        .enumerate()
        .map(|(i, field)| match field.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(LoadError::MalformedLine {
                line: line_no,
                reason: format!("component {} is not a finite number: '{}'", i + 1, field),
            }),
        })
        .collect::<Result<Vec<f64>, LoadError>>()?;

    Ok((word, components))
}
