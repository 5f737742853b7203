//! Search projections over the grouped habit listing.
//!
//! # Responsibility
//! - Derive filtered views of category/habit groupings from a text query.
//!
//! # Invariants
//! - Filtering is a pure projection: no repository access, no mutation.

mod filter;

pub use filter::filter_groups;
