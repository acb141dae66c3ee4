//! Compute layer for radius query planning.
//!
//! Everything here is pure: no I/O, no shared mutable state. Storage and key
//! encoding stay behind the traits in [`crate::codec`].

pub mod ranges;
pub mod validation;

pub use ranges::{
    PrecisionPolicy, cell_width_km, expand, haversine_km, merge, radial_hash_ranges, select_bits,
    within_radius,
};
