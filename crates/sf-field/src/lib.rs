//! `sf-field` — the cost-to-nearest-unclaimed-goal field.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`field`] | `CostField` (owner, lazy recompute), `FieldView` (reader)  |
//!
//! # Freshness
//!
//! A `CostField` is stamped with the [`Grid::revision`][sf_grid::Grid::revision]
//! it was computed at.  The only way to read costs is through a [`FieldView`],
//! and the only way to get a `FieldView` is [`CostField::view`], which
//! recomputes first whenever the stamp is stale.  A stale read is therefore
//! impossible by construction.

pub mod field;


pub use field::{CostField, FieldView, UNREACHABLE};
