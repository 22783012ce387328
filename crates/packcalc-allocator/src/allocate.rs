//! Dynamic-programming pack allocation.
//!
//! For every target `t` in `1..=quantity` the table holds the best known way
//! to cover `t`: the fewest total items, then the fewest packs, plus the last
//! pack added to get there. A target is covered by taking one pack `p` on top
//! of the best cover for `max(0, t - p)`. Clamping at zero is what allows a
//! single oversized pack to cover a small remainder.
//!
//! Largest-first greedy selection is not optimal in general (catalog `{3, 5}`
//! and quantity 6 is the smallest counter-example), so every pack size is
//! tried at every target.

use crate::allocation::Allocation;
use crate::pack_size::PackSize;

/// Best known cover for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    total_items: u64,
    num_packs: u64,
    last_pack: Option<PackSize>,
}

impl Entry {
    const BASE: Entry = Entry {
        total_items: 0,
        num_packs: 0,
        last_pack: None,
    };

    const UNREACHED: Entry = Entry {
        total_items: u64::MAX,
        num_packs: u64::MAX,
        last_pack: None,
    };

    fn is_reached(&self) -> bool {
        self.total_items != u64::MAX
    }

    fn extend(&self, pack: PackSize) -> Entry {
        Entry {
            total_items: self.total_items.saturating_add(pack.get()),
            num_packs: self.num_packs + 1,
            last_pack: Some(pack),
        }
    }

    /// Fewer items wins; equal items fall back to fewer packs.
    ///
    /// Strict comparison: on a full tie the earlier candidate stays, so with
    /// the catalog visited largest first the larger pack is recorded.
    fn beats(&self, other: &Entry) -> bool {
        (self.total_items, self.num_packs) < (other.total_items, other.num_packs)
    }
}

/// Choose the packs that fulfil `quantity` from `pack_sizes`.
///
/// Returns the allocation shipping the fewest items `>= quantity`, using the
/// fewest packs among those. Degenerate inputs yield an empty allocation:
/// `quantity <= 0`, or an empty catalog.
///
/// Duplicate sizes and catalog ordering do not affect the result.
///
/// Runs in `O(quantity × |pack_sizes|)` time and `O(quantity)` space and
/// enforces no upper bound on `quantity`. When the table for `quantity`
/// cannot be allocated the result is empty.
#[must_use]
pub fn allocate(quantity: i64, pack_sizes: &[PackSize]) -> Allocation {
    let Ok(target) = u64::try_from(quantity) else {
        return Allocation::default();
    };
    if target == 0 {
        return Allocation::default();
    }

    if let Some(&exact) = pack_sizes.iter().find(|size| size.get() == target) {
        return Allocation::single(exact);
    }

    // Quantities beyond the address space cannot be tabulated.
    let Ok(target) = usize::try_from(target) else {
        return Allocation::default();
    };

    let catalog = normalize(pack_sizes);
    if catalog.is_empty() {
        return Allocation::default();
    }

    solve(target, &catalog)
}

/// Deduplicated catalog, largest pack first.
///
/// Fixing the visit order makes ties between equally good covers resolve the
/// same way no matter how the caller listed the sizes.
fn normalize(pack_sizes: &[PackSize]) -> Vec<PackSize> {
    let mut catalog = pack_sizes.to_vec();
    catalog.sort_unstable_by(|a, b| b.cmp(a));
    catalog.dedup();
    catalog
}

fn solve(target: usize, catalog: &[PackSize]) -> Allocation {
    match build_table(target, catalog) {
        Some(table) => reconstruct(target, &table),
        None => Allocation::default(),
    }
}

/// `None` when a table of `target + 1` entries cannot be allocated.
fn build_table(target: usize, catalog: &[PackSize]) -> Option<Vec<Entry>> {
    let len = target.checked_add(1)?;
    let mut table = Vec::new();
    table.try_reserve_exact(len).ok()?;
    table.resize(len, Entry::UNREACHED);
    table[0] = Entry::BASE;

    for t in 1..=target {
        let mut best = Entry::UNREACHED;
        for &pack in catalog {
            let prev = table[remaining_after(t, pack)];
            if !prev.is_reached() {
                continue;
            }
            let candidate = prev.extend(pack);
            if candidate.beats(&best) {
                best = candidate;
            }
        }
        table[t] = best;
    }

    Some(table)
}

fn reconstruct(target: usize, table: &[Entry]) -> Allocation {
    let mut allocation = Allocation::default();
    let mut current = target;

    while current > 0 {
        let Some(pack) = table[current].last_pack else {
            break;
        };
        allocation.add(pack);
        current = remaining_after(current, pack);
    }

    allocation
}

/// `max(0, t - pack)` without overflow on narrow targets.
fn remaining_after(t: usize, pack: PackSize) -> usize {
    usize::try_from(pack.get()).map_or(0, |items| t.saturating_sub(items))
}
