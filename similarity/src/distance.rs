use pulp::{Arch, Simd, WithSimd};

/// COSINE SIMILARITY
///
/// The cosine of the angle between two vectors, in [-1, 1]:
/// - 1  → identical direction (most similar)
/// - -1 → opposite direction
/// - 0  → orthogonal (independent)
///
/// cos(θ) = A · B / (||A|| * ||B||)
///
/// Fused kernel: the dot product and both squared magnitudes are
/// accumulated in a single pass over the vectors rather than three.
///
/// A vector of zero magnitude has no direction, so any comparison
/// involving one is defined as exactly 0 rather than NaN. Downstream
/// ranking relies on never seeing NaN out of this function.
struct CosineSimilarityKernel<'a> {
    first: &'a [f32],
    second: &'a [f32],
}

impl WithSimd for CosineSimilarityKernel<'_> {
    type Output = f32;

    #[inline(always)]
    fn with_simd<S: Simd>(self, simd: S) -> Self::Output {
        let (first_head, first_tail) = S::as_simd_f32s(self.first);
        let (second_head, second_tail) = S::as_simd_f32s(self.second);

        let mut dot = simd.splat_f32s(0.0);
        let mut mag_first = simd.splat_f32s(0.0);
        let mut mag_second = simd.splat_f32s(0.0);

        for (&a, &b) in first_head.iter().zip(second_head) {
            dot = simd.mul_add_f32s(a, b, dot);
            mag_first = simd.mul_add_f32s(a, a, mag_first);
            mag_second = simd.mul_add_f32s(b, b, mag_second);
        }

        let mut dot_sum = simd.reduce_sum_f32s(dot);
        let mut mag_first_sum = simd.reduce_sum_f32s(mag_first);
        let mut mag_second_sum = simd.reduce_sum_f32s(mag_second);

        for (&x, &y) in first_tail.iter().zip(second_tail) {
            dot_sum += x * y;
            mag_first_sum += x * x;
            mag_second_sum += y * y;
        }

        if mag_first_sum == 0.0 || mag_second_sum == 0.0 {
            return 0.0;
        }

        dot_sum / (mag_first_sum.sqrt() * mag_second_sum.sqrt())
    }
}

#[tracing::instrument(skip_all)]
pub fn cosine_similarity(first: &[f32], second: &[f32]) -> f32 {
    assert_eq!(
        first.len(),
        second.len(),
        "Vectors must have the same length!"
    );

    let arch = Arch::new();
    arch.dispatch(CosineSimilarityKernel { first, second })
}

/// DOT PRODUCT
///
/// Sum of the products of corresponding components. Exposed on its own for
/// callers that work with pre-normalized vectors, where it coincides with
/// cosine similarity without the magnitude division.
struct DotProduct<'a> {
    first: &'a [f32],
    second: &'a [f32],
}

impl WithSimd for DotProduct<'_> {
    type Output = f32;

    #[inline(always)]
    fn with_simd<S: Simd>(self, simd: S) -> Self::Output {
        let (first_head, first_tail) = S::as_simd_f32s(self.first);
        let (second_head, second_tail) = S::as_simd_f32s(self.second);

        let mut sum_of_points = simd.splat_f32s(0.0);

        for (&chunk_first, &chunk_second) in first_head.iter().zip(second_head) {
            sum_of_points = simd.mul_add_f32s(chunk_first, chunk_second, sum_of_points);
        }

        let mut dot_product = simd.reduce_sum_f32s(sum_of_points);

        dot_product += first_tail
            .iter()
            .zip(second_tail)
            .map(|(&x, &y)| x * y)
            .sum::<f32>();
        dot_product
    }
}

#[tracing::instrument(skip_all)]
pub fn dot_product(first: &[f32], second: &[f32]) -> f32 {
    assert_eq!(
        first.len(),
        second.len(),
        "Vectors must have the same length!"
    );

    let arch = Arch::new();
    arch.dispatch(DotProduct { first, second })
}
