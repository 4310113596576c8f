//! Session Configuration

use std::path::PathBuf;

use crate::vector::{Direction, DEFAULT_DIMENSION};

/// Default destination for query results
pub const DEFAULT_OUTPUT: &str = "./out.txt";

/// Session configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Embedding source file (None until one is chosen)
    pub embeddings: Option<PathBuf>,

    /// Where query results are written
    pub output: PathBuf,

    /// Vector dimension shared by loader and queries
    pub dimension: usize,

    /// Result ordering
    pub direction: Direction,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embeddings: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            dimension: DEFAULT_DIMENSION,
            direction: Direction::Descending,
        }
    }
}

impl Config {
    /// Set the embedding source file
    pub fn with_embeddings(mut self, path: impl Into<PathBuf>) -> Self {
        self.embeddings = Some(path.into());
        self
    }

    /// Set the results file
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.embeddings, None);
        assert_eq!(config.output, PathBuf::from("./out.txt"));
        assert_eq!(config.dimension, 50);
        assert_eq!(config.direction, Direction::Descending);
    }

    #[test]
    fn test_builder() {
        let config = Config::default()
            .with_embeddings("vectors.txt")
            .with_output("results.txt")
            .with_dimension(3)
            .with_direction(Direction::Ascending);

        assert_eq!(config.embeddings, Some(PathBuf::from("vectors.txt")));
        assert_eq!(config.output, PathBuf::from("results.txt"));
        assert_eq!(config.dimension, 3);
        assert_eq!(config.direction, Direction::Ascending);
    }
}
