//! Search Session
//!
//! Holds the active embedding store, the configuration, and metrics for one
//! run of the tool. Every operation takes the session explicitly.

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{LoadError, RankError, Result};
use crate::metrics::{Metrics, Operation};
use crate::output::write_ranking_file;
use crate::vector::{rank, Direction, EmbeddingStore, LoadStats, Ranking};

/// Search session over one embedding store at a time
///
/// A reload builds the new store before taking the write lock and swaps it
/// in whole, so a reader holding [`Session::store`] sees either the old store
/// or the new one.
pub struct Session {
    config: RwLock<Config>,
    store: RwLock<Arc<EmbeddingStore>>,
    metrics: Metrics,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Session {
    /// Create a session with an empty store
    pub fn new(config: Config) -> Self {
        let store = EmbeddingStore::new(config.dimension);
        Self {
            config: RwLock::new(config),
            store: RwLock::new(Arc::new(store)),
            metrics: Metrics::new(),
        }
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    /// Current store
    pub fn store(&self) -> Arc<EmbeddingStore> {
        Arc::clone(&self.store.read())
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Load embeddings from `path`, replacing the current store
    ///
    /// On failure the previous store stays active and the configured source
    /// path is left unchanged.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadStats, LoadError> {
        let path = path.as_ref();
        let dimension = self.config.read().dimension;
        let start = Instant::now();

        let result = EmbeddingStore::load_path(path, dimension);
        self.metrics.record(Operation::Load, result.is_ok(), start.elapsed());

        match result {
            Ok(store) => {
                let stats = store.stats();
                self.replace_store(store);
                self.config.write().embeddings = Some(path.to_path_buf());
                info!("Embedding source set to {}", path.display());
                Ok(stats)
            }
            Err(e) => {
                warn!("Load of {} failed: {}", path.display(), e);
                Err(e)
            }
        }
    }

    /// Reload the configured embedding source, if one is set
    pub fn reload(&self) -> Result<Option<LoadStats>, LoadError> {
        let path = self.config.read().embeddings.clone();
        match path {
            Some(path) => self.load(path).map(Some),
            None => Ok(None),
        }
    }

    /// Swap in a store built elsewhere
    pub fn replace_store(&self, store: EmbeddingStore) {
        let store = Arc::new(store);
        *self.store.write() = store;
    }

    pub fn set_output(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        info!("Output file set to {}", path.display());
        self.config.write().output = path;
    }

    pub fn set_direction(&self, direction: Direction) {
        info!("Sort direction set to {}", direction);
        self.config.write().direction = direction;
    }

    /// Rank the `k` words closest to (or furthest from) `word`
    pub fn find_similar(&self, word: &str, k: usize) -> Result<Ranking, RankError> {
        let store = self.store();
        let direction = self.config.read().direction;
        let start = Instant::now();

        let result = rank(&store, word, k, direction);
        let elapsed = start.elapsed();
        self.metrics.record(Operation::Query, result.is_ok(), elapsed);

        if let Ok(ranking) = &result {
            debug!(
                "Ranked {} candidates for '{}' ({}), kept {} in {:?}",
                store.len().saturating_sub(1),
                ranking.query,
                direction,
                ranking.len(),
                elapsed
            );
        }
        result
    }

    /// Rank and write the results to the configured output file
    pub fn write_similar(&self, word: &str, k: usize) -> Result<Ranking> {
        let ranking = self.find_similar(word, k)?;
        let output = self.config.read().output.clone();

        write_ranking_file(&output, &ranking)?;
        info!(
            "Wrote {} results for '{}' to {}",
            ranking.len(),
            ranking.query,
            output.display()
        );
        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use std::fs;
    use tempfile::TempDir;

    const ANIMALS: &str = "cat, 1, 0\ndog, 0.9, 0.1\ncar, 0, 1\n";

    fn setup() -> (TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("animals.txt"), ANIMALS).unwrap();
        let config = Config::default()
            .with_dimension(2)
            .with_output(dir.path().join("out.txt"));
        (dir, Session::new(config))
    }

    #[test]
    fn test_empty_session_reports_word_not_found() {
        let session = Session::default();
        let err = session.find_similar("cat", 3).unwrap_err();
        assert_eq!(err, RankError::WordNotFound("cat".to_string()));
    }

    #[test]
    fn test_load_and_query() {
        let (dir, session) = setup();
        let path = dir.path().join("animals.txt");

        let stats = session.load(&path).unwrap();
        assert_eq!(stats.embeddings, 3);
        assert_eq!(session.config().embeddings, Some(path));

        let ranking = session.find_similar("cat", 2).unwrap();
        let words: Vec<&str> = ranking.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["dog", "car"]);
    }

    #[test]
    fn test_direction_applies_to_later_queries() {
        let (dir, session) = setup();
        session.load(dir.path().join("animals.txt")).unwrap();

        session.set_direction(Direction::Ascending);
        let ranking = session.find_similar("cat", 1).unwrap();
        assert_eq!(ranking.results[0].word, "car");
        assert_eq!(ranking.direction, Direction::Ascending);
    }

    #[test]
    fn test_failed_load_keeps_previous_store() {
        let (dir, session) = setup();
        let good = dir.path().join("animals.txt");
        let bad = dir.path().join("bad.txt");
        fs::write(&bad, "owl, 1, 1\nbat, x, 1\n").unwrap();

        session.load(&good).unwrap();
        let err = session.load(&bad).unwrap_err();

        assert_eq!(err.line(), Some(2));
        assert_eq!(session.store().len(), 3);
        assert!(!session.store().contains("owl"));
        assert_eq!(session.config().embeddings, Some(good));
        assert_eq!(session.metrics().failed(Operation::Load), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let (dir, session) = setup();
        let err = session.load(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_reload_replaces_not_merges() {
        let (dir, session) = setup();
        let path = dir.path().join("animals.txt");
        session.load(&path).unwrap();
        let before = session.store();

        fs::write(&path, "sun, 1, 1\nmoon, 1, 0\n").unwrap();
        let stats = session.reload().unwrap().unwrap();

        assert_eq!(stats.embeddings, 2);
        let after = session.store();
        assert!(!after.contains("cat"));
        assert!(after.contains("moon"));
        // Earlier snapshots are unaffected by the swap
        assert!(before.contains("cat"));
    }

    #[test]
    fn test_reload_without_source() {
        let session = Session::default();
        assert_eq!(session.reload().unwrap(), None);
    }

    #[test]
    fn test_write_similar_writes_output_file() {
        let (dir, session) = setup();
        session.load(dir.path().join("animals.txt")).unwrap();

        session.write_similar("CAT", 5).unwrap();

        let text = fs::read_to_string(dir.path().join("out.txt")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Similar words for 'cat':");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("dog : 0.99"));
        assert_eq!(lines[2], "car : 0");
    }

    #[test]
    fn test_write_similar_absent_word_writes_nothing() {
        let (dir, session) = setup();
        session.load(dir.path().join("animals.txt")).unwrap();

        let err = session.write_similar("horse", 5).unwrap_err();
        assert!(matches!(err, SessionError::Rank(RankError::WordNotFound(_))));
        assert!(!dir.path().join("out.txt").exists());
        assert_eq!(session.store().len(), 3);
    }

    #[test]
    fn test_write_failure_is_output_error() {
        let (dir, session) = setup();
        session.load(dir.path().join("animals.txt")).unwrap();
        session.set_output(dir.path().join("missing").join("out.txt"));

        let err = session.write_similar("cat", 1).unwrap_err();
        assert!(matches!(err, SessionError::Output(_)));
    }
}
