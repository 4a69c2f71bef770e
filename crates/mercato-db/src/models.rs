//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`. Column order is fixed by the `COLS` constant of the
//! query module that reads it.

use mercato_common::{CategoryId, ItemId};
use serde::Serialize;

/// A category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: CategoryId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
        })
    }
}

/// Denormalized read view of an item with its category name joined in.
///
/// This is what lookups, listings and searches return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub image_name: Option<String>,
}

impl ItemView {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: ItemId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
            category: row.get(2)?,
            image_name: row.get(3)?,
        })
    }
}
