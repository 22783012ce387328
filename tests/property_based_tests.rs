//! Property-Based Tests for packcalc
//!
//! Checks the allocator against an independent oracle: an unbounded
//! exact-sum table giving the fewest packs for every reachable total. The
//! best shipment for `q` is the smallest reachable total `>= q`, sent in the
//! fewest packs that reach it.
//!
//! ## Configuration
//!
//! Property test case counts can be configured via environment variables:
//!
//! - `PROPTEST_CASES`: Number of test cases per property (default: 64)
//! - `PROPTEST_MAX_SHRINK_ITERS`: Max shrinking iterations on failure (default: 1000)
//!
//! ```bash
//! PROPTEST_CASES=256 cargo test --test property_based_tests
//! ```

use packcalc::{Allocation, PackSize, allocate};
use proptest::prelude::*;
use std::env;

/// Default number of test cases per property.
const DEFAULT_PROPTEST_CASES: u32 = 64;

/// Default max shrink iterations.
const DEFAULT_MAX_SHRINK_ITERS: u32 = 1000;

/// Creates a ProptestConfig that respects environment variables.
///
/// `max_cases` caps the case count for slow properties even when
/// `PROPTEST_CASES` asks for more.
fn proptest_config(max_cases: Option<u32>) -> ProptestConfig {
    let env_cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PROPTEST_CASES);

    let env_shrink_iters = env::var("PROPTEST_MAX_SHRINK_ITERS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_MAX_SHRINK_ITERS);

    let cases = match max_cases {
        Some(max) => env_cases.min(max),
        None => env_cases,
    };

    ProptestConfig {
        cases,
        max_shrink_iters: env_shrink_iters,
        max_shrink_time: 30000, // 30 seconds max shrink time
        ..ProptestConfig::default()
    }
}

/// Fewest packs reaching each exact total `0..=limit`, `None` if unreachable.
fn exact_sum_table(sizes: &[u64], limit: usize) -> Vec<Option<u64>> {
    let mut table = vec![None; limit + 1];
    table[0] = Some(0);
    for total in 1..=limit {
        table[total] = sizes
            .iter()
            .filter_map(|&size| {
                let size = usize::try_from(size).ok()?;
                let prev = total.checked_sub(size)?;
                table[prev].map(|packs| packs + 1)
            })
            .min();
    }
    table
}

/// `(total_items, total_packs)` of the best shipment for `quantity`.
fn oracle(quantity: u64, sizes: &[u64]) -> (u64, u64) {
    let largest = sizes.iter().copied().max().unwrap_or(0);
    let limit = usize::try_from(quantity + largest).unwrap();
    let table = exact_sum_table(sizes, limit);

    (quantity as usize..=limit)
        .find_map(|total| table[total].map(|packs| (total as u64, packs)))
        .unwrap()
}

fn to_catalog(sizes: &[u64]) -> Vec<PackSize> {
    sizes.iter().copied().filter_map(PackSize::new).collect()
}

fn shipped_items(allocation: &Allocation) -> u64 {
    allocation
        .iter()
        .map(|(size, count)| size.get() * count)
        .sum()
}

fn arb_catalog() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..=60, 1..=5)
}

proptest! {
    #![proptest_config(proptest_config(None))]

    #[test]
    fn prop_matches_exact_sum_oracle(sizes in arb_catalog(), quantity in 1u64..=400) {
        let allocation = allocate(quantity as i64, &to_catalog(&sizes));
        let (best_items, best_packs) = oracle(quantity, &sizes);

        prop_assert_eq!(allocation.total_items(), best_items);
        prop_assert_eq!(allocation.total_packs(), best_packs);
    }

    #[test]
    fn prop_never_ships_short(sizes in arb_catalog(), quantity in 1u64..=400) {
        let allocation = allocate(quantity as i64, &to_catalog(&sizes));

        prop_assert!(allocation.total_items() >= quantity);
        prop_assert_eq!(shipped_items(&allocation), allocation.total_items());
        prop_assert!(allocation.iter().all(|(size, count)| count > 0 && sizes.contains(&size.get())));
    }

    #[test]
    fn prop_overshoot_below_largest_pack(sizes in arb_catalog(), quantity in 1u64..=400) {
        let allocation = allocate(quantity as i64, &to_catalog(&sizes));
        let largest = sizes.iter().copied().max().unwrap();

        prop_assert!(allocation.overshoot(quantity as i64) < largest);
    }

    #[test]
    fn prop_catalog_order_and_duplicates_do_not_matter(
        sizes in arb_catalog(),
        quantity in 1u64..=400,
    ) {
        let mut reordered = sizes.clone();
        reordered.reverse();
        reordered.extend_from_slice(&sizes);

        prop_assert_eq!(
            allocate(quantity as i64, &to_catalog(&sizes)),
            allocate(quantity as i64, &to_catalog(&reordered))
        );
    }

    #[test]
    fn prop_exact_pack_is_a_single_pack(sizes in arb_catalog(), pick in any::<prop::sample::Index>()) {
        let size = sizes[pick.index(sizes.len())];
        let allocation = allocate(size as i64, &to_catalog(&sizes));

        prop_assert_eq!(allocation.total_items(), size);
        prop_assert_eq!(allocation.total_packs(), 1);
    }

    #[test]
    fn prop_non_positive_quantity_is_empty(sizes in arb_catalog(), quantity in i64::MIN..=0) {
        prop_assert!(allocate(quantity, &to_catalog(&sizes)).is_empty());
    }
}

proptest! {
    #![proptest_config(proptest_config(Some(16)))]

    #[test]
    fn prop_large_orders_match_oracle(quantity in 5_000u64..=50_000) {
        let sizes = [250, 500, 1000, 2000, 5000];
        let allocation = allocate(quantity as i64, &to_catalog(&sizes));
        let (best_items, best_packs) = oracle(quantity, &sizes);

        prop_assert_eq!(allocation.total_items(), best_items);
        prop_assert_eq!(allocation.total_packs(), best_packs);
    }
}
