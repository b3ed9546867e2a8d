//! Property-based tests for path containment and quota accounting.
//!
//! These tests use proptest to generate arbitrary inputs and verify
//! security properties hold across a wide range of cases.

#![allow(clippy::unwrap_used)]

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use proptest::prelude::*;
use ziparch_core::ArchiveError;
use ziparch_core::Boundary;
use ziparch_core::DestDir;
use ziparch_core::ExtractionLimits;
use ziparch_core::SafePath;
use ziparch_core::security::QuotaTracker;
use ziparch_core::security::clean_path;
use ziparch_core::security::compute_budget;
use ziparch_core::security::is_contained;

fn dest() -> DestDir {
    let boundary = Boundary::new("/work").unwrap();
    DestDir::resolve("/work/out", &boundary).unwrap()
}

/// Path segments. Names start with `n` so an escaped path can never
/// re-enter `/work/out` by naming it.
fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "n[a-zA-Z0-9_-]{0,11}",
        1 => Just(".".to_string()),
        2 => Just("..".to_string()),
    ]
}

proptest! {
    /// Every accepted entry resolves inside the destination.
    #[test]
    fn prop_accepted_entries_stay_inside(segments in prop::collection::vec(segment(), 1..8)) {
        let dest = dest();
        let name = segments.join("/");
        if let Ok(safe) = SafePath::validate(&name, &dest) {
            prop_assert!(safe.as_path().starts_with(dest.as_path()));
            prop_assert!(!safe
                .as_path()
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::CurDir)));
        }
    }

    /// An entry is rejected exactly when its `..` components outnumber the
    /// preceding names at some point.
    #[test]
    fn prop_rejection_matches_depth(segments in prop::collection::vec(segment(), 1..8)) {
        let mut depth: i64 = 0;
        let mut escapes = false;
        for s in &segments {
            match s.as_str() {
                "." => {}
                ".." => {
                    depth -= 1;
                    if depth < 0 {
                        escapes = true;
                    }
                }
                _ => depth += 1,
            }
        }

        let result = SafePath::validate(&segments.join("/"), &dest());
        if escapes {
            let rejected = matches!(result, Err(ArchiveError::PathTraversal { .. }));
            prop_assert!(rejected);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// Plain relative names are always accepted and keep their shape.
    #[test]
    fn prop_valid_relative_names_accepted(
        components in prop::collection::vec("[a-zA-Z0-9_-]{1,20}", 1..5)
    ) {
        let name = components.join("/");
        let safe = SafePath::validate(&name, &dest()).unwrap();
        prop_assert_eq!(safe.as_path(), Path::new("/work/out").join(&name));
    }

    /// Cleaning is idempotent.
    #[test]
    fn prop_clean_path_idempotent(segments in prop::collection::vec(segment(), 0..8), absolute in any::<bool>()) {
        let joined = segments.join("/");
        let path = if absolute { format!("/{joined}") } else { joined };
        let once = clean_path(Path::new(&path));
        prop_assert_eq!(clean_path(&once), once);
    }

    /// A root contains its descendants but never a sibling sharing its prefix.
    #[test]
    fn prop_sibling_prefix_not_contained(
        root in "[a-z]{1,8}",
        suffix in "[a-z0-9]{1,4}",
        child in "[a-z]{1,8}",
    ) {
        let root_path = PathBuf::from(format!("/{root}"));
        prop_assert!(is_contained(&root_path, &root_path.join(&child)));
        let sibling = format!("/{root}{suffix}");
        prop_assert!(!is_contained(&root_path, Path::new(&sibling)));
    }

    /// The budget never exceeds free space.
    #[test]
    fn prop_budget_bounded(free in any::<u64>(), fraction in 0.000_001f64..=1.0) {
        let budget = compute_budget(free, fraction).unwrap();
        prop_assert!(budget <= free);
    }

    /// Declared totals within the budget are accepted; one byte more is not.
    #[test]
    fn prop_quota_boundary(sizes in prop::collection::vec(0u64..10_000, 1..20)) {
        let total: u64 = sizes.iter().sum();

        let mut exact = QuotaTracker::new(ExtractionLimits::new(100, total));
        for size in &sizes {
            prop_assert!(exact.record_declared(*size).is_ok());
        }

        if total > 0 {
            let mut tight = QuotaTracker::new(ExtractionLimits::new(100, total - 1));
            let failed = sizes.iter().any(|size| tight.record_declared(*size).is_err());
            prop_assert!(failed);
        }
    }
}
