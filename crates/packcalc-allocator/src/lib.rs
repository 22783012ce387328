//! packcalc-allocator - optimal pack allocation
//!
//! Given an order quantity and a catalog of pack sizes, [`allocate`] picks the
//! multiset of packs that ships the fewest total items (overshoot allowed,
//! undershoot never) and, among those, uses the fewest packs.
//!
//! The allocator is a pure function: it owns its working table for the
//! duration of one call and can be invoked concurrently without coordination.
//! Callers are responsible for bounding the quantity they accept, since time
//! and memory grow linearly with it.
//!
//! ```rust
//! use packcalc_allocator::{PackSize, allocate};
//!
//! let catalog: Vec<PackSize> = [250, 500, 1000, 2000, 5000]
//!     .into_iter()
//!     .filter_map(PackSize::new)
//!     .collect();
//!
//! let allocation = allocate(12_001, &catalog);
//! assert_eq!(allocation.total_items(), 12_250);
//! assert_eq!(allocation.total_packs(), 4);
//! ```

pub mod allocate;
pub mod allocation;
pub mod pack_size;

pub use allocate::allocate;
pub use allocation::Allocation;
pub use pack_size::{InvalidPackSize, PackSize};
