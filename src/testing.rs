//! Testing utilities for code built on parcelbeam.
//!
//! - **Builders**: [`FeatureBuilder`] assembles one feature fluently
//! - **Fixtures**: small ready-made datasets and on-disk feature collections
//! - **Assertions**: partition invariants with readable failure messages
//!
//! # Quick Start
//!
//! ```
//! use parcelbeam::config::FieldMap;
//! use parcelbeam::partition::partition_by_field;
//! use parcelbeam::testing::*;
//!
//! let fields = FieldMap::default();
//! let dataset = two_owner_dataset(&fields);
//! let groups = partition_by_field(dataset.features(), &fields.zoning, "Unknown");
//!
//! assert_partition_total(&groups, dataset.features());
//! assert_group_order(&groups, &["R-1", "C-1"]);
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
