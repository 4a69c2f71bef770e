//! Database query modules.
//!
//! - categories: lazy category creation and lookup
//! - items: item insert, point lookup, listing and keyword search

pub mod categories;
pub mod items;
