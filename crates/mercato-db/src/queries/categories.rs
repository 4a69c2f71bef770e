//! Category lookup and lazy creation.

use mercato_common::{CategoryId, Error, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::models::Category;

/// Column list used in SELECT statements.
const COLS: &str = "id, name";

/// Return the id of the category named exactly `name`, creating it first if
/// it does not exist yet.
///
/// The insert is `INSERT OR IGNORE` against the unique name constraint,
/// followed by a re-select, so callers racing on a brand-new name all get
/// the id of the single row that won.
pub fn resolve_or_create_category(conn: &Connection, name: &str) -> Result<CategoryId> {
    if name.is_empty() {
        return Err(Error::validation("category name must not be empty"));
    }

    let inserted = conn
        .execute("INSERT OR IGNORE INTO categories (name) VALUES (?1)", [name])
        .map_err(|e| Error::database(e.to_string()))?;
    if inserted > 0 {
        tracing::debug!(category = name, "Created category");
    }

    get_category_by_name(conn, name)?
        .map(|c| c.id)
        .ok_or_else(|| Error::integrity(format!("category '{name}' vanished after insert")))
}

/// Look up a category by exact, case-sensitive name.
pub fn get_category_by_name(conn: &Connection, name: &str) -> Result<Option<Category>> {
    let q = format!("SELECT {COLS} FROM categories WHERE name = ?1");
    conn.query_row(&q, [name], Category::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// Look up a category by id.
pub fn get_category(conn: &Connection, id: CategoryId) -> Result<Option<Category>> {
    let q = format!("SELECT {COLS} FROM categories WHERE id = ?1");
    conn.query_row(&q, [id.get()], Category::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}
