//! Solution filters applied to the validated-path pool.
//!
//! Each filter is a pure set-to-set function; the three compose by
//! intersection, so application order does not change the survivor set. The
//! pipeline records a survivor count after each stage so callers can narrate
//! where the pool went empty.

use std::collections::BTreeSet;

use crate::{strand::Strand, validator::ValidatedPath};

/// Survivor counts recorded after each filter stage of one search run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FilterTrace {
    /// Distinct validated paths before any filter ran.
    pub validated: usize,
    /// Survivors after the endpoint filter.
    pub after_endpoints: usize,
    /// Survivors after the length filter.
    pub after_length: usize,
    /// Survivors after the coverage filter.
    pub after_coverage: usize,
}

/// Keeps paths that start at `start` and finish at `end`.
///
/// Comparison is exact strand equality, not vertex-id equality.
#[must_use]
pub fn retain_endpoints(
    paths: &BTreeSet<ValidatedPath>,
    start: &Strand,
    end: &Strand,
) -> BTreeSet<ValidatedPath> {
    paths
        .iter()
        .filter(|path| path.first() == Some(start) && path.last() == Some(end))
        .cloned()
        .collect()
}

/// Keeps paths of exactly `required` vertices.
#[must_use]
pub fn retain_length(
    paths: &BTreeSet<ValidatedPath>,
    required: usize,
) -> BTreeSet<ValidatedPath> {
    paths
        .iter()
        .filter(|path| path.len() == required)
        .cloned()
        .collect()
}

/// Keeps paths that visit every strand in `required` at least once.
#[must_use]
pub fn retain_coverage(
    paths: &BTreeSet<ValidatedPath>,
    required: &[Strand],
) -> BTreeSet<ValidatedPath> {
    paths
        .iter()
        .filter(|path| required.iter().all(|strand| path.contains(strand)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::validator::ValidatedPath;

    fn strand(fill: char) -> Strand {
        fill.to_string()
            .repeat(20)
            .parse()
            .expect("fixture symbol repeats into a strand")
    }

    fn path(fills: &[char]) -> ValidatedPath {
        ValidatedPath::new(fills.iter().map(|&fill| strand(fill)).collect())
    }

    fn pool() -> BTreeSet<ValidatedPath> {
        [
            path(&['0', '1', '2']),
            path(&['0', '2']),
            path(&['0', '1', '1']),
            path(&['1', '0', '2']),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn endpoints_filter_matches_exact_strands() {
        let survivors = retain_endpoints(&pool(), &strand('0'), &strand('2'));
        assert_eq!(survivors.len(), 2);
        assert!(survivors.contains(&path(&['0', '1', '2'])));
        assert!(survivors.contains(&path(&['0', '2'])));
    }

    #[test]
    fn length_filter_keeps_exact_lengths_only() {
        let survivors = retain_length(&pool(), 3);
        assert_eq!(survivors.len(), 3);
        assert!(!survivors.contains(&path(&['0', '2'])));
    }

    #[test]
    fn coverage_filter_requires_every_strand() {
        let required = [strand('0'), strand('1'), strand('2')];
        let survivors = retain_coverage(&pool(), &required);
        assert_eq!(survivors.len(), 2);
        assert!(survivors.contains(&path(&['0', '1', '2'])));
        assert!(survivors.contains(&path(&['1', '0', '2'])));
    }

    #[rstest]
    #[case::endpoints_length_coverage([0, 1, 2])]
    #[case::coverage_endpoints_length([2, 0, 1])]
    #[case::length_coverage_endpoints([1, 2, 0])]
    fn filters_commute_over_the_survivor_set(#[case] order: [usize; 3]) {
        let required = [strand('0'), strand('1'), strand('2')];
        let mut survivors = pool();
        for stage in order {
            survivors = match stage {
                0 => retain_endpoints(&survivors, &strand('0'), &strand('2')),
                1 => retain_length(&survivors, 3),
                _ => retain_coverage(&survivors, &required),
            };
        }
        let expected: BTreeSet<_> = [path(&['0', '1', '2'])].into_iter().collect();
        assert_eq!(survivors, expected);
    }

    #[test]
    fn conjunction_equals_the_intersection_of_individual_filters() {
        let required = [strand('0'), strand('1'), strand('2')];
        let all = pool();
        let by_endpoints = retain_endpoints(&all, &strand('0'), &strand('2'));
        let by_length = retain_length(&all, 3);
        let by_coverage = retain_coverage(&all, &required);
        let intersection: BTreeSet<_> = by_endpoints
            .iter()
            .filter(|p| by_length.contains(*p) && by_coverage.contains(*p))
            .cloned()
            .collect();
        let piped = retain_coverage(
            &retain_length(&retain_endpoints(&all, &strand('0'), &strand('2')), 3),
            &required,
        );
        assert_eq!(piped, intersection);
    }
}
