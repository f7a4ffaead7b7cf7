use std::cmp::Ordering;
use std::num::NonZeroUsize;

use crate::distance::cosine_similarity;

/// Scores a query vector against every candidate in pool order and returns
/// the top `k` as `(candidate index, score)` pairs, highest score first.
///
/// The scan is linear over the pool with no index structure. The sort is
/// stable, so candidates with equal scores keep their original pool order.
/// Candidate vectors must share the query's dimension.
#[tracing::instrument(skip_all, fields(k = k.get()))]
pub fn top_k<'a, I>(query: &[f32], candidates: I, k: NonZeroUsize) -> Vec<(usize, f32)>
where
    I: IntoIterator<Item = (usize, &'a [f32])>,
{
    let mut scored: Vec<(usize, f32)> = candidates
        .into_iter()
        .map(|(index, vector)| (index, cosine_similarity(query, vector)))
        .collect();
    // cosine_similarity never yields NaN, so Equal is unreachable filler
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(k.get());
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nonzero(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_top_k_orders_by_descending_score() {
        let query = [1.0f32, 0.0];
        let aligned = [2.0f32, 0.0];
        let diagonal = [1.0f32, 1.0];
        let orthogonal = [0.0f32, 3.0];
        let pool = vec![
            (0, &orthogonal[..]),
            (1, &diagonal[..]),
            (2, &aligned[..]),
        ];

        let ranked = top_k(&query, pool, nonzero(3));
        let order: Vec<usize> = ranked.iter().map(|(index, _)| *index).collect();
        assert_eq!(order, vec![2, 1, 0]);
        assert!(ranked.windows(2).all(|pair| pair[0].1 >= pair[1].1));
    }

    #[test]
    fn test_top_k_truncates_to_k() {
        let query = [1.0f32, 0.0];
        let vectors: Vec<[f32; 2]> = (0..10).map(|i| [1.0, i as f32 * 0.1]).collect();
        let pool: Vec<(usize, &[f32])> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, &v[..]))
            .collect();

        assert_eq!(top_k(&query, pool.clone(), nonzero(3)).len(), 3);
        // fewer eligible candidates than k
        assert_eq!(top_k(&query, pool, nonzero(100)).len(), 10);
    }

    #[test]
    fn test_equal_scores_keep_pool_order() {
        let query = [1.0f32, 0.0];
        // scaled copies of the same direction all score exactly 1.0
        let first = [1.0f32, 0.0];
        let second = [2.0f32, 0.0];
        let third = [3.0f32, 0.0];
        let pool = vec![(7, &first[..]), (3, &second[..]), (5, &third[..])];

        let ranked = top_k(&query, pool, nonzero(3));
        let order: Vec<usize> = ranked.iter().map(|(index, _)| *index).collect();
        assert_eq!(order, vec![7, 3, 5]);
    }

    #[test]
    fn test_zero_vectors_rank_last_with_zero_score() {
        let query = [1.0f32, 1.0];
        let aligned = [1.0f32, 1.0];
        let degenerate = [0.0f32, 0.0];
        let pool = vec![(0, &degenerate[..]), (1, &aligned[..])];

        let ranked = top_k(&query, pool, nonzero(2));
        assert_eq!(ranked[0].0, 1);
        assert_eq!(ranked[1], (0, 0.0));
    }
}
