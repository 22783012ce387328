//! Allocation result: pack size to count.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::pack_size::PackSize;

/// The packs chosen for one order, as a count per pack size.
///
/// Sizes with a zero count are never stored. Iteration is ascending by pack
/// size, so rendering is deterministic. Serializes as a JSON object keyed by
/// pack size, e.g. `{"250":1,"5000":2}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Allocation {
    packs: BTreeMap<PackSize, u64>,
}

impl Allocation {
    /// One pack of the given size.
    #[must_use]
    pub fn single(size: PackSize) -> Self {
        let mut allocation = Self::default();
        allocation.add(size);
        allocation
    }

    pub(crate) fn add(&mut self, size: PackSize) {
        *self.packs.entry(size).or_insert(0) += 1;
    }

    /// Count for a pack size (0 when the size is not used).
    #[must_use]
    pub fn count(&self, size: PackSize) -> u64 {
        self.packs.get(&size).copied().unwrap_or(0)
    }

    /// `(size, count)` pairs, smallest pack first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (PackSize, u64)> + '_ {
        self.packs.iter().map(|(&size, &count)| (size, count))
    }

    /// `(size, count)` pairs, largest pack first.
    pub fn iter_largest_first(&self) -> impl Iterator<Item = (PackSize, u64)> + '_ {
        self.iter().rev()
    }

    /// Number of distinct pack sizes used.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Total items shipped: `Σ size × count`.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.iter().fold(0_u64, |sum, (size, count)| {
            sum.saturating_add(size.get().saturating_mul(count))
        })
    }

    /// Total packs shipped: `Σ count`.
    #[must_use]
    pub fn total_packs(&self) -> u64 {
        self.packs.values().sum()
    }

    /// Items shipped beyond what was ordered.
    #[must_use]
    pub fn overshoot(&self, quantity: i64) -> u64 {
        let ordered = u64::try_from(quantity).unwrap_or(0);
        self.total_items().saturating_sub(ordered)
    }
}

impl FromIterator<(PackSize, u64)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (PackSize, u64)>>(iter: I) -> Self {
        let mut packs = BTreeMap::new();
        for (size, count) in iter {
            if count > 0 {
                *packs.entry(size).or_insert(0) += count;
            }
        }
        Self { packs }
    }
}
