// File: src/core/combinations.rs
use crate::core::types::{Axis, Candidate};
use itertools::{Either, Itertools};
use std::collections::HashSet;
use std::iter;

/// Lazily enumerates every candidate tuple for a list of axes.
///
/// Each axis gets an extra "omitted" choice, the Cartesian product is taken over the
/// augmented axes, and every permutation of a product element is yielded with the
/// omitted slots removed. The result is each ordering of each subset of the axes,
/// with at most one value taken per axis, including the empty tuple.
///
/// Output is deduplicated as it is produced. With `k` axes of `n` values the product
/// alone has `(n + 1)^k` elements and each spawns up to `k!` permutations, so this
/// is only meant for a handful of axes.
pub fn candidates(axes: &[Axis]) -> impl Iterator<Item = Candidate> + '_ {
    let mut seen: HashSet<Vec<&str>> = HashSet::new();

    products(axes)
        .flat_map(|product| {
            // `None` marks an omitted axis; dropping it before permuting yields the
            // same tuples as permuting first and filtering after.
            let present: Vec<&str> = product.into_iter().flatten().collect();
            if present.is_empty() {
                Either::Left(iter::once(present))
            } else {
                let k = present.len();
                Either::Right(present.into_iter().permutations(k))
            }
        })
        .filter(move |tuple| seen.insert(tuple.clone()))
        .map(|tuple| tuple.into_iter().map(str::to_string).collect())
}

/// Upper bound on the product elements `candidates` walks before permuting.
/// `None` if it does not fit in a `usize`.
pub fn product_size(axes: &[Axis]) -> Option<usize> {
    axes.iter()
        .try_fold(1usize, |acc, axis| acc.checked_mul(axis.len() + 1))
}

fn products(axes: &[Axis]) -> impl Iterator<Item = Vec<Option<&str>>> + '_ {
    if axes.is_empty() {
        return Either::Left(iter::once(Vec::new()));
    }

    Either::Right(
        axes.iter()
            .map(|axis| {
                axis.iter()
                    // An empty value expresses nothing, same as omitting the axis.
                    .filter(|value| !value.is_empty())
                    .map(|value| Some(value.as_str()))
                    .chain(iter::once(None))
            })
            .multi_cartesian_product(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(values: &[&str]) -> Axis {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn collect(axes: &[Axis]) -> HashSet<Candidate> {
        candidates(axes).collect()
    }

    fn tuple(values: &[&str]) -> Candidate {
        axis(values)
    }

    #[test]
    fn two_axes_cover_every_ordered_subset() {
        let set = collect(&[axis(&["a", "b"]), axis(&["x"])]);

        for expected in [
            tuple(&["a", "x"]),
            tuple(&["x", "a"]),
            tuple(&["b", "x"]),
            tuple(&["x", "b"]),
            tuple(&["a"]),
            tuple(&["b"]),
            tuple(&["x"]),
            tuple(&[]),
        ] {
            assert!(set.contains(&expected), "missing {:?}", expected);
        }
        assert!(!set.contains(&tuple(&["a", "b"])));
        assert!(!set.contains(&tuple(&["b", "a"])));
        assert_eq!(set.len(), 8);
    }

    #[test]
    fn output_has_no_duplicates() {
        let axes = [axis(&["a", "b"]), axis(&["x", "y"]), axis(&["m"])];
        let all: Vec<Candidate> = candidates(&axes).collect();
        let unique: HashSet<Candidate> = all.iter().cloned().collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn no_axes_yield_only_the_empty_tuple() {
        let all: Vec<Candidate> = candidates(&[]).collect();
        assert_eq!(all, vec![Candidate::new()]);
    }

    #[test]
    fn empty_axis_only_contributes_omission() {
        let set = collect(&[axis(&[]), axis(&["x"])]);
        assert_eq!(set, HashSet::from([tuple(&["x"]), tuple(&[])]));
    }

    #[test]
    fn shared_values_across_axes_may_repeat() {
        let set = collect(&[axis(&["GDP"]), axis(&["GDP"])]);
        assert!(set.contains(&tuple(&["GDP", "GDP"])));
        assert!(set.contains(&tuple(&["GDP"])));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn three_axes_include_all_orderings() {
        let set = collect(&[axis(&["a"]), axis(&["b"]), axis(&["c"])]);
        // 1 empty + 3 singles + 6 pairs + 6 triples
        assert_eq!(set.len(), 16);
        assert!(set.contains(&tuple(&["c", "a", "b"])));
    }

    #[test]
    fn product_size_counts_omission() {
        assert_eq!(product_size(&[]), Some(1));
        assert_eq!(product_size(&[axis(&["a", "b"]), axis(&["x"])]), Some(6));
    }
}
