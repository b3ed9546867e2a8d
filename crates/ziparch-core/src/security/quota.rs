//! Extraction quota tracking and validation.

use crate::ArchiveError;
use crate::ExtractionLimits;
use crate::QuotaResource;
use crate::Result;

/// Tracks resource usage during a single extraction.
///
/// Declared sizes come from entry headers and are checked before any data
/// is read. Written bytes are only checked when
/// [`ExtractionLimits::enforce_actual_size`] is set.
#[derive(Debug)]
pub struct QuotaTracker {
    limits: ExtractionLimits,
    declared_bytes: u64,
    written_bytes: u64,
}

impl QuotaTracker {
    /// Creates a tracker with zeroed counters.
    #[must_use]
    pub fn new(limits: ExtractionLimits) -> Self {
        Self {
            limits,
            declared_bytes: 0,
            written_bytes: 0,
        }
    }

    /// Checks the archive's entry count against the limit.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::QuotaExceeded` if `count` is strictly greater
    /// than the configured maximum.
    pub fn check_entry_count(&self, count: usize) -> Result<()> {
        if count > self.limits.max_entries {
            return Err(ArchiveError::QuotaExceeded {
                resource: QuotaResource::EntryCount {
                    count,
                    max: self.limits.max_entries,
                },
            });
        }
        Ok(())
    }

    /// Adds an entry's declared size to the running total.
    ///
    /// A total exactly equal to the budget is accepted.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::QuotaExceeded` if the new total exceeds the
    /// budget or overflows `u64`.
    pub fn record_declared(&mut self, size: u64) -> Result<()> {
        self.declared_bytes = self.declared_bytes.checked_add(size).ok_or(
            ArchiveError::QuotaExceeded {
                resource: QuotaResource::IntegerOverflow,
            },
        )?;

        if self.declared_bytes > self.limits.max_uncompressed_bytes {
            return Err(ArchiveError::QuotaExceeded {
                resource: QuotaResource::TotalSize {
                    current: self.declared_bytes,
                    max: self.limits.max_uncompressed_bytes,
                },
            });
        }
        Ok(())
    }

    /// Adds bytes actually written to disk.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::QuotaExceeded` if actual-size enforcement is
    /// enabled and the written total exceeds the budget.
    pub fn record_written(&mut self, bytes: u64) -> Result<()> {
        self.written_bytes = self.written_bytes.saturating_add(bytes);

        if self.limits.enforce_actual_size
            && self.written_bytes > self.limits.max_uncompressed_bytes
        {
            return Err(ArchiveError::QuotaExceeded {
                resource: QuotaResource::TotalSize {
                    current: self.written_bytes,
                    max: self.limits.max_uncompressed_bytes,
                },
            });
        }
        Ok(())
    }

    /// Returns the running total of declared sizes.
    #[must_use]
    pub fn declared_bytes(&self) -> u64 {
        self.declared_bytes
    }

    /// Returns the running total of bytes written.
    #[must_use]
    pub fn written_bytes(&self) -> u64 {
        self.written_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_tracker_new() {
        let tracker = QuotaTracker::new(ExtractionLimits::default());
        assert_eq!(tracker.declared_bytes(), 0);
        assert_eq!(tracker.written_bytes(), 0);
    }

    #[test]
    fn test_entry_count_at_limit_accepted() {
        let tracker = QuotaTracker::new(ExtractionLimits::new(2, 100));
        assert!(tracker.check_entry_count(0).is_ok());
        assert!(tracker.check_entry_count(2).is_ok());
    }

    #[test]
    fn test_entry_count_over_limit() {
        let tracker = QuotaTracker::new(ExtractionLimits::new(2, 100));
        let result = tracker.check_entry_count(3);
        assert!(matches!(
            result,
            Err(ArchiveError::QuotaExceeded {
                resource: QuotaResource::EntryCount { count: 3, max: 2 }
            })
        ));
    }

    #[test]
    fn test_declared_total_equal_to_budget_accepted() {
        let mut tracker = QuotaTracker::new(ExtractionLimits::new(10, 30));
        assert!(tracker.record_declared(10).is_ok());
        assert!(tracker.record_declared(20).is_ok());
        assert_eq!(tracker.declared_bytes(), 30);
    }

    #[test]
    fn test_declared_total_over_budget() {
        let mut tracker = QuotaTracker::new(ExtractionLimits::new(10, 29));
        assert!(tracker.record_declared(10).is_ok());
        let result = tracker.record_declared(20);
        assert!(matches!(
            result,
            Err(ArchiveError::QuotaExceeded {
                resource: QuotaResource::TotalSize { current: 30, max: 29 }
            })
        ));
    }

    #[test]
    fn test_zero_budget_accepts_empty_entries() {
        let mut tracker = QuotaTracker::new(ExtractionLimits::new(10, 0));
        assert!(tracker.record_declared(0).is_ok());
        assert!(tracker.record_declared(1).is_err());
    }

    #[test]
    fn test_declared_overflow() {
        let mut tracker = QuotaTracker::new(ExtractionLimits::new(10, u64::MAX));
        assert!(tracker.record_declared(u64::MAX).is_ok());
        let result = tracker.record_declared(1);
        assert!(matches!(
            result,
            Err(ArchiveError::QuotaExceeded {
                resource: QuotaResource::IntegerOverflow
            })
        ));
    }

    #[test]
    fn test_written_not_enforced_by_default() {
        let mut tracker = QuotaTracker::new(ExtractionLimits::new(10, 5));
        assert!(tracker.record_written(100).is_ok());
        assert_eq!(tracker.written_bytes(), 100);
    }

    #[test]
    fn test_written_enforced_when_enabled() {
        let limits = ExtractionLimits::new(10, 5).with_actual_size_enforcement(true);
        let mut tracker = QuotaTracker::new(limits);
        assert!(tracker.record_written(5).is_ok());
        assert!(matches!(
            tracker.record_written(1),
            Err(ArchiveError::QuotaExceeded { .. })
        ));
    }
}
