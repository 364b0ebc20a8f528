//! Decoding pairwise solutions into partitions.
//!
//! The solver answers "is pair `(i, j)` together?" for every `i < j`. The
//! decoder turns those answers into one group label per record with a single
//! greedy pass over the pairs in id order:
//!
//! | `i` | `j` | Action |
//! |-----|-----|--------|
//! | unassigned | unassigned | open a new group for both |
//! | assigned | unassigned | `j` joins `i`'s group |
//! | unassigned | assigned | `i` joins `j`'s group |
//! | assigned | assigned | nothing; groups are never merged |
//!
//! Records touched by no active pair become singletons at the end.
//!
//! A pair counts as active when its value is `> 0`. For binary models that is
//! exactly `= 1`. For the LP relaxation it also accepts fractional values, so
//! a relaxed solution decodes as if every fractional pair were together.
//!
//! On a transitive 0/1 solution the greedy pass reproduces the clusters
//! exactly. On anything else the result depends on pair order.

use crate::error::{Error, Result};
use crate::model::VariableMap;

/// Group labels, one per record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partition {
    labels: Vec<usize>,
    n_groups: usize,
}

impl Partition {
    /// Build from labels; ids must be dense in `0..n_groups`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] if the labels are not dense.
    pub fn from_labels(labels: Vec<usize>) -> Result<Self> {
        let n_groups = labels.iter().max().map_or(0, |&m| m + 1);
        let mut seen = vec![false; n_groups];
        for &l in &labels {
            seen[l] = true;
        }
        if seen.iter().any(|&s| !s) {
            return Err(Error::InvalidParameter {
                name: "labels",
                message: "group ids must be dense",
            });
        }
        Ok(Self { labels, n_groups })
    }

    /// Label of every record.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Label of record `i`.
    pub fn label(&self, i: usize) -> usize {
        self.labels[i]
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the partition covers no records.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of groups.
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    /// Whether `a` and `b` share a group.
    pub fn same_group(&self, a: usize, b: usize) -> bool {
        self.labels[a] == self.labels[b]
    }

    /// Members of each group, indexed by group id, ascending.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.n_groups];
        for (i, &l) in self.labels.iter().enumerate() {
            groups[l].push(i);
        }
        groups
    }

    /// Relabel so groups are numbered by their smallest member.
    ///
    /// Two partitions with the same blocks have equal canonical forms.
    pub fn canonical(&self) -> Self {
        let mut remap = vec![usize::MAX; self.n_groups];
        let mut next = 0;
        let labels = self
            .labels
            .iter()
            .map(|&l| {
                if remap[l] == usize::MAX {
                    remap[l] = next;
                    next += 1;
                }
                remap[l]
            })
            .collect();
        Self {
            labels,
            n_groups: self.n_groups,
        }
    }

    /// Consume into the label vector.
    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Unassigned,
    Assigned(usize),
}

/// Decode solver values (indexed by variable id) into a partition.
///
/// Only pairs `i < j` of `map` are consulted.
///
/// # Errors
///
/// [`Error::DimensionMismatch`] if `values.len()` differs from `map.len()`.
pub fn decode_partition(map: &VariableMap, values: &[f64]) -> Result<Partition> {
    if values.len() != map.len() {
        return Err(Error::DimensionMismatch {
            expected: map.len(),
            found: values.len(),
        });
    }

    let mut slots = vec![Slot::Unassigned; map.n_records()];
    let mut next_group = 0;

    for (i, j, id) in map.pairs() {
        if values[id.index()] <= 0.0 {
            continue;
        }
        match (slots[i], slots[j]) {
            (Slot::Unassigned, Slot::Unassigned) => {
                slots[i] = Slot::Assigned(next_group);
                slots[j] = Slot::Assigned(next_group);
                next_group += 1;
            }
            (Slot::Assigned(g), Slot::Unassigned) => slots[j] = Slot::Assigned(g),
            (Slot::Unassigned, Slot::Assigned(g)) => slots[i] = Slot::Assigned(g),
            (Slot::Assigned(_), Slot::Assigned(_)) => {}
        }
    }

    let labels = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Assigned(g) => g,
            Slot::Unassigned => {
                next_group += 1;
                next_group - 1
            }
        })
        .collect();

    Ok(Partition {
        labels,
        n_groups: next_group,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pairs_then_singletons() {
        // n = 4, ids: 01 02 03 12 13 23
        let map = VariableMap::new(4);
        let values = [0.0, 0.0, 0.0, 0.0, 0.0, 1.0];
        let p = decode_partition(&map, &values).unwrap();
        // Pair 23 opens group 0; 0 and 1 become singletons 1 and 2.
        assert_eq!(p.labels(), &[1, 2, 0, 0]);
        assert_eq!(p.n_groups(), 3);
    }

    #[test]
    fn transitive_cluster_decodes_to_one_group() {
        let map = VariableMap::new(3);
        let p = decode_partition(&map, &[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(p.labels(), &[0, 0, 0]);
    }

    #[test]
    fn both_assigned_is_a_no_op() {
        // n = 4, active: 02, 13, 23. Pair 23 links two existing groups; they stay apart.
        let map = VariableMap::new(4);
        let values = [0.0, 1.0, 0.0, 0.0, 1.0, 1.0];
        let p = decode_partition(&map, &values).unwrap();
        assert_eq!(p.labels(), &[0, 1, 0, 1]);

        // Active: 01, 13, 23. Later endpoints join the existing group.
        let values = [1.0, 0.0, 0.0, 0.0, 1.0, 1.0];
        let p = decode_partition(&map, &values).unwrap();
        assert_eq!(p.labels(), &[0, 0, 0, 0]);
    }

    #[test]
    fn nothing_active_gives_singletons() {
        let map = VariableMap::new(3);
        let p = decode_partition(&map, &[0.0; 3]).unwrap();
        assert_eq!(p.labels(), &[0, 1, 2]);
        assert_eq!(p.n_groups(), 3);
    }

    #[test]
    fn fractional_values_count_as_together() {
        let map = VariableMap::new(2);
        let p = decode_partition(&map, &[0.25]).unwrap();
        assert!(p.same_group(0, 1));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let map = VariableMap::new(3);
        assert_eq!(
            decode_partition(&map, &[1.0]).unwrap_err(),
            Error::DimensionMismatch {
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    fn single_record() {
        let p = decode_partition(&VariableMap::new(1), &[]).unwrap();
        assert_eq!(p.labels(), &[0]);
    }

    #[test]
    fn canonical_relabels_by_first_member() {
        let p = Partition::from_labels(vec![2, 0, 2, 1]).unwrap();
        assert_eq!(p.canonical().labels(), &[0, 1, 0, 2]);
        assert_eq!(p.groups(), vec![vec![1], vec![3], vec![0, 2]]);
        assert!(Partition::from_labels(vec![0, 2]).is_err());
    }

    proptest! {
        #[test]
        fn decoded_partition_is_complete_and_stable(
            n in 1usize..10,
            bits in proptest::collection::vec(proptest::bool::ANY, 45),
        ) {
            let map = VariableMap::new(n);
            let values: Vec<f64> = bits[..map.len()]
                .iter()
                .map(|&b| if b { 1.0 } else { 0.0 })
                .collect();

            let p = decode_partition(&map, &values).unwrap();
            prop_assert_eq!(p.len(), n);
            prop_assert!(p.labels().iter().all(|&l| l < p.n_groups()));
            // Dense ids.
            prop_assert!(Partition::from_labels(p.labels().to_vec()).is_ok());

            let again = decode_partition(&map, &values).unwrap();
            prop_assert_eq!(p, again);
        }
    }
}
