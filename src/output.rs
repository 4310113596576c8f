//! Result Output
//!
//! Renders a ranking as a header line followed by `word : score` lines.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::OutputError;
use crate::vector::Ranking;

/// Write a ranking to any writer
pub fn write_ranking<W: Write>(writer: &mut W, ranking: &Ranking) -> io::Result<()> {
    writeln!(writer, "Similar words for '{}':", ranking.query)?;
    for result in ranking.iter() {
        writeln!(writer, "{} : {}", result.word, result.score)?;
    }
    writer.flush()
}

/// Create (or truncate) `path` and write a ranking to it
pub fn write_ranking_file(path: &Path, ranking: &Ranking) -> Result<(), OutputError> {
    let to_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    write_ranking(&mut writer, ranking).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{Direction, RankedResult};

    fn sample() -> Ranking {
        Ranking {
            query: "cat".to_string(),
            direction: Direction::Descending,
            results: vec![
                RankedResult {
                    word: "dog".to_string(),
                    score: 0.75,
                },
                RankedResult {
                    word: "car".to_string(),
                    score: 0.0,
                },
            ],
        }
    }

    #[test]
    fn test_write_ranking_format() {
        let mut buf = Vec::new();
        write_ranking(&mut buf, &sample()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Similar words for 'cat':\ndog : 0.75\ncar : 0\n");
    }

    #[test]
    fn test_score_is_not_rounded() {
        let mut ranking = sample();
        ranking.results[0].score = 0.993883734673619;

        let mut buf = Vec::new();
        write_ranking(&mut buf, &ranking).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let line = text.lines().nth(1).unwrap();
        let score: f64 = line.split(" : ").nth(1).unwrap().parse().unwrap();
        assert_eq!(score, 0.993883734673619);
    }

    #[test]
    fn test_write_ranking_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale contents that are longer than the new ones\n").unwrap();

        write_ranking_file(&path, &sample()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Similar words for 'cat':\n"));
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_write_ranking_file_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.txt");

        let err = write_ranking_file(&path, &sample()).unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
    }
}
