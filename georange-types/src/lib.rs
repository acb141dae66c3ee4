//! # georange-types
//!
//! Plain data types shared by the georange query planner:
//!
//! - **Range types**: `HashRange` (an interval of integer geohash codes) and
//!   `KeyRange` (the same interval encoded as store keys)
//! - **Cell types**: `CellBounds` and `CellNeighbors`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use georange_types::range::HashRange;
//!
//! let range = HashRange::new(0x10 << 56, 0x11 << 56);
//! assert!(range.contains(0x10 << 56));
//! assert!(!range.contains(0x11 << 56));
//! ```

pub mod cell;
pub mod range;
