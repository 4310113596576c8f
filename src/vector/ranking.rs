//! Similarity Ranking
//!
//! Exhaustive top-k search: score the query word against every other stored
//! word, order by score, keep the first k.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::embedding_store::EmbeddingStore;
use super::similarity::cosine_similarity;
use crate::error::RankError;

/// Sort direction for a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Most similar first
    #[default]
    Descending,
    /// Least similar first
    Ascending,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Descending => write!(f, "highest first"),
            Direction::Ascending => write!(f, "lowest first"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" | "high" | "highest" => Ok(Direction::Descending),
            "asc" | "ascending" | "low" | "lowest" => Ok(Direction::Ascending),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

/// A candidate word and its cosine similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub word: String,
    pub score: f64,
}

/// Ordered results of one query
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub query: String,
    pub direction: Direction,
    pub results: Vec<RankedResult>,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedResult> {
        self.results.iter()
    }
}

/// Validate a user-supplied result count
pub fn checked_k(k: i64) -> Result<usize, RankError> {
    usize::try_from(k).map_err(|_| RankError::InvalidK(k))
}

/// Rank every other word in `store` by similarity to `query`
///
/// Ties are broken by word in ascending lexical order regardless of
/// direction, so output is reproducible. `k = 0` yields an empty ranking.
pub fn rank(
    store: &EmbeddingStore,
    query: &str,
    k: usize,
    direction: Direction,
) -> Result<Ranking, RankError> {
    let target = store
        .get(query)
        .ok_or_else(|| RankError::WordNotFound(query.trim().to_lowercase()))?;

    let mut results: Vec<RankedResult> = store
        .iter()
        .filter(|candidate| candidate.word != target.word)
        .map(|candidate| RankedResult {
            word: candidate.word.clone(),
            score: cosine_similarity(&target.vector, &candidate.vector),
        })
        .collect();

    let order = |a: &RankedResult, b: &RankedResult| compare(a, b, direction);

    // Partition out the k best before sorting only those
    if k < results.len() {
        if k == 0 {
            results.clear();
        } else {
            results.select_nth_unstable_by(k - 1, order);
            results.truncate(k);
        }
    }
    results.sort_unstable_by(order);

    Ok(Ranking {
        query: target.word.clone(),
        direction,
        results,
    })
}

fn compare(a: &RankedResult, b: &RankedResult, direction: Direction) -> Ordering {
    let by_score = match direction {
        Direction::Descending => b.score.total_cmp(&a.score),
        Direction::Ascending => a.score.total_cmp(&b.score),
    };
    by_score.then_with(|| a.word.cmp(&b.word))
}
