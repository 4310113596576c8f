//! Vector Similarity Functions
//!
//! Cosine similarity over equal-length `f64` vectors.

/// Largest absolute component, or `0.0` for an empty or all-zero vector
#[inline]
fn max_abs(v: &[f64]) -> f64 {
    v.iter().fold(0.0f64, |max, x| max.max(x.abs()))
}

/// Euclidean norm of a vector
///
/// Components are scaled by the largest magnitude before squaring, so the
/// result stays finite for any finite input.
#[inline]
pub fn magnitude(v: &[f64]) -> f64 {
    let scale = max_abs(v);
    if scale == 0.0 {
        return 0.0;
    }
    scale * v.iter().map(|x| (x / scale).powi(2)).sum::<f64>().sqrt()
}

/// Compute cosine similarity between two vectors
///
/// Returns a value in `[-1, 1]` where 1 means identical direction. If either
/// vector has zero norm the result is exactly `0.0`, so an all-zero vector is
/// dissimilar to everything, itself included.
///
/// Both vectors are scaled to a largest component of 1 first. Cosine is
/// scale-invariant, and this keeps the squares from overflowing.
///
/// # Panics
///
/// Panics if the vectors differ in length.
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "Vector dimensions must match");

    let scale_a = max_abs(a);
    let scale_b = max_abs(b);
    if scale_a == 0.0 || scale_b == 0.0 {
        return 0.0;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (x / scale_a, y / scale_b);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let score = dot / (norm_a.sqrt() * norm_b.sqrt());
    if score.is_finite() {
        score.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
