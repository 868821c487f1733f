//! Marker size scaling.

use crate::error::{ViewError, ViewResult};

/// Largest marker size produced by [`log_scaled`].
pub const MAX_MARKER_SIZE: f64 = 30.0;

/// `MAX_MARKER_SIZE * ln(a + 1) / max(ln(a + 1))` for every value.
///
/// An empty column, one whose largest log value is not positive, or one
/// with any value at or below -1 has no valid rescale.
pub fn log_scaled(values: &[f64], attribute: &str) -> ViewResult<Vec<f64>> {
    let logs: Vec<f64> = values.iter().map(|a| (a + 1.0).ln()).collect();
    let max = logs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if logs.is_empty() || max <= 0.0 || logs.iter().any(|l| !l.is_finite()) {
        return Err(ViewError::DegenerateScale {
            attribute: attribute.to_string(),
        });
    }

    Ok(logs.into_iter().map(|l| l / max * MAX_MARKER_SIZE).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_column_is_degenerate() {
        let err = log_scaled(&[0.0, 0.0, 0.0], "total_pop").unwrap_err();
        assert!(matches!(err, ViewError::DegenerateScale { .. }));
    }

    #[test]
    fn test_minus_one_is_degenerate() {
        // ln(0) is -inf; it must not reach the figure as a size.
        let err = log_scaled(&[-1.0, 9.0, 99.0], "total_pop").unwrap_err();
        assert!(matches!(err, ViewError::DegenerateScale { .. }));
        assert!(log_scaled(&[-2.0, 9.0], "total_pop").is_err());
    }

    #[test]
    fn test_empty_column_is_degenerate() {
        assert!(log_scaled(&[], "total_pop").is_err());
    }

    #[test]
    fn test_sizes_increase_and_peak_at_thirty() {
        let sizes = log_scaled(&[9.0, 99.0, 999.0], "total_pop").unwrap();
        assert!(sizes[0] < sizes[1] && sizes[1] < sizes[2]);
        assert_eq!(sizes[2], MAX_MARKER_SIZE);
        // ln(10) / ln(1000) = 1/3
        assert!((sizes[0] - 10.0).abs() < 1e-9);
    }
}
