//! Extraction size budget derived from available disk space.

use crate::ArchiveError;
use crate::Result;

/// Fraction of free disk space an extraction may consume by default.
pub const DEFAULT_RESERVE_FRACTION: f64 = 0.3;

/// Computes the maximum total uncompressed bytes an extraction may declare.
///
/// The result is `floor(free_disk_bytes * reserve_fraction)`. A free-space
/// figure of zero (including "unknown") yields a budget of zero, which
/// rejects any archive containing a non-empty file. Callers are expected to
/// surface that as a configuration problem.
///
/// The disk query is not performed here; pass the figure in.
///
/// # Errors
///
/// Returns `ArchiveError::InvalidConfig` if `reserve_fraction` is not a
/// finite number in `(0, 1]`.
///
/// # Examples
///
/// ```
/// use ziparch_core::security::compute_budget;
///
/// assert_eq!(compute_budget(1000, 0.3).unwrap(), 300);
/// assert_eq!(compute_budget(0, 0.3).unwrap(), 0);
/// assert!(compute_budget(1000, 1.5).is_err());
/// ```
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn compute_budget(free_disk_bytes: u64, reserve_fraction: f64) -> Result<u64> {
    if !reserve_fraction.is_finite() || reserve_fraction <= 0.0 || reserve_fraction > 1.0 {
        return Err(ArchiveError::InvalidConfig {
            reason: format!("reserve fraction must be in (0, 1], got {reserve_fraction}"),
        });
    }

    if reserve_fraction == 1.0 {
        return Ok(free_disk_bytes);
    }

    // f64 loses precision above 2^53 bytes; the floor keeps the result
    // at or below the exact product.
    let budget = (free_disk_bytes as f64 * reserve_fraction).floor();
    Ok(budget.min(free_disk_bytes as f64) as u64)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_default_fraction() {
        assert_eq!(
            compute_budget(10_000, DEFAULT_RESERVE_FRACTION).unwrap(),
            3_000
        );
    }

    #[test]
    fn test_budget_floors() {
        assert_eq!(compute_budget(10, 0.25).unwrap(), 2);
        assert_eq!(compute_budget(1, 0.5).unwrap(), 0);
    }

    #[test]
    fn test_budget_zero_free_space() {
        assert_eq!(compute_budget(0, 0.3).unwrap(), 0);
        assert_eq!(compute_budget(0, 1.0).unwrap(), 0);
    }

    #[test]
    fn test_budget_full_fraction_is_exact() {
        assert_eq!(compute_budget(u64::MAX, 1.0).unwrap(), u64::MAX);
    }

    #[test]
    fn test_budget_never_exceeds_free_space() {
        let budget = compute_budget(u64::MAX, 0.999_999).unwrap();
        assert!(budget <= u64::MAX);
        let budget = compute_budget(12_345, 0.999_999).unwrap();
        assert!(budget <= 12_345);
    }

    #[test]
    fn test_budget_rejects_bad_fraction() {
        for fraction in [0.0, -0.1, 1.01, f64::NAN, f64::INFINITY] {
            let result = compute_budget(1000, fraction);
            assert!(
                matches!(result, Err(ArchiveError::InvalidConfig { .. })),
                "fraction {fraction} should be rejected"
            );
        }
    }
}
