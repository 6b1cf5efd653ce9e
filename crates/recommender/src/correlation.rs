//! Pairwise Pearson correlation over sparse rating vectors.
//!
//! Both recommenders compare rating vectors that only partially overlap:
//! users rate different movies, movies are rated by different users. The
//! correlation here is therefore *pairwise*: only dimensions present on
//! both sides contribute, and the coefficient is undefined (`None`) when
//! the overlap is too small or either side has zero variance.

use std::collections::BTreeMap;

/// Minimum number of overlapping points for a coefficient to be defined
pub const MIN_OVERLAP: usize = 2;

/// Pearson correlation coefficient of two equally-long sample slices.
///
/// Returns `None` when there are fewer than [`MIN_OVERLAP`] samples or
/// either side has zero variance. The denominator is `sqrt(vx * vy)`
/// rather than `sqrt(vx) * sqrt(vy)` so that a vector correlated with
/// itself yields exactly 1.0.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    debug_assert_eq!(xs.len(), ys.len());

    if xs.len() < MIN_OVERLAP {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (cov, var_x, var_y) =
        xs.iter()
            .zip(ys.iter())
            .fold((0.0, 0.0, 0.0), |(cov, vx, vy), (&x, &y)| {
                let dx = x - mean_x;
                let dy = y - mean_y;
                (cov + dx * dy, vx + dx * dx, vy + dy * dy)
            });

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov / (var_x * var_y).sqrt())
}

/// Pairwise Pearson correlation of two sparse vectors.
///
/// Only keys present in both maps contribute; everything else is treated
/// as "not rated" and skipped.
pub fn pairwise_pearson<K: Ord>(a: &BTreeMap<K, f32>, b: &BTreeMap<K, f32>) -> Option<f64> {
    let mut xs = Vec::new();
    let mut ys = Vec::new();

    for (key, &x) in a {
        if let Some(&y) = b.get(key) {
            xs.push(x as f64);
            ys.push(y as f64);
        }
    }

    pearson(&xs, &ys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(u32, f32)]) -> BTreeMap<u32, f32> {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_perfect_correlation() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [2.0, 4.0, 6.0];
        assert_eq!(pearson(&xs, &ys), Some(1.0));
    }

    #[test]
    fn test_perfect_anticorrelation() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [3.0, 2.0, 1.0];
        assert_eq!(pearson(&xs, &ys), Some(-1.0));
    }

    #[test]
    fn test_self_correlation_is_exactly_one() {
        let v = [5.0, 4.0, 3.0, 1.5, 2.5];
        assert_eq!(pearson(&v, &v), Some(1.0));
    }

    #[test]
    fn test_zero_variance_is_undefined() {
        let xs = [3.0, 3.0, 3.0];
        let ys = [1.0, 2.0, 3.0];
        assert_eq!(pearson(&xs, &ys), None);
        assert_eq!(pearson(&ys, &xs), None);
    }

    #[test]
    fn test_short_overlap_is_undefined() {
        assert_eq!(pearson(&[], &[]), None);
        assert_eq!(pearson(&[1.0], &[2.0]), None);
    }

    #[test]
    fn test_pairwise_skips_missing_keys() {
        // Only keys 1, 2, 3 are shared; keys 4 and 5 must not contribute
        let a = vector(&[(1, 1.0), (2, 2.0), (3, 3.0), (4, 5.0)]);
        let b = vector(&[(1, 2.0), (2, 4.0), (3, 6.0), (5, 0.5)]);

        assert_eq!(pairwise_pearson(&a, &b), Some(1.0));
    }

    #[test]
    fn test_pairwise_single_common_key_is_undefined() {
        let a = vector(&[(1, 4.0), (2, 3.0)]);
        let b = vector(&[(2, 5.0), (3, 1.0)]);

        assert_eq!(pairwise_pearson(&a, &b), None);
    }

    #[test]
    fn test_exact_boundary_fixture() {
        // Hand-built pair whose coefficient is exactly 0.6: every
        // intermediate value is a small dyadic rational, so the float
        // math is exact end to end.
        let a = vector(&[(1, 4.0), (2, 4.0), (3, 2.0), (4, 2.0)]);
        let b = vector(&[(1, 4.75), (2, 2.75), (3, 3.25), (4, 1.25)]);

        assert_eq!(pairwise_pearson(&a, &b), Some(0.6));
    }
}
