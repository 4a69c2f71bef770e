//! Item insert, lookup, list, and search operations.

use mercato_common::{CategoryId, Error, ItemId, Result};
use rusqlite::{Connection, ErrorCode, OptionalExtension};

use crate::models::ItemView;
use crate::queries::categories;

/// Column list for the denormalized item view.
const VIEW_COLS: &str = "items.id, items.name, categories.name, items.image_name";

/// Join shared by every view query.
const VIEW_FROM: &str = "FROM items JOIN categories ON items.category_id = categories.id";

/// Insert a new item referencing an existing category.
///
/// The category is checked explicitly rather than trusted, since callers
/// resolve it in a separate step. A foreign-key failure at insert time is
/// reported the same way.
pub fn create_item(
    conn: &Connection,
    name: &str,
    category_id: CategoryId,
    image_name: Option<&str>,
) -> Result<ItemId> {
    if name.is_empty() {
        return Err(Error::validation("item name must not be empty"));
    }

    if categories::get_category(conn, category_id)?.is_none() {
        return Err(Error::integrity(format!(
            "category {category_id} does not exist"
        )));
    }

    conn.execute(
        "INSERT INTO items (name, category_id, image_name) VALUES (?1, ?2, ?3)",
        rusqlite::params![name, category_id.get(), image_name],
    )
    .map_err(|e| match e.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => {
            Error::integrity(format!("item '{name}' rejected: {e}"))
        }
        _ => Error::database(e.to_string()),
    })?;

    Ok(ItemId::from(conn.last_insert_rowid()))
}

/// Get the denormalized view of an item by ID.
pub fn get_item(conn: &Connection, id: ItemId) -> Result<Option<ItemView>> {
    let q = format!("SELECT {VIEW_COLS} {VIEW_FROM} WHERE items.id = ?1");
    conn.query_row(&q, [id.get()], ItemView::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// List every item in insertion order.
pub fn list_items(conn: &Connection) -> Result<Vec<ItemView>> {
    let q = format!("SELECT {VIEW_COLS} {VIEW_FROM} ORDER BY items.id ASC");
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], ItemView::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Items whose name or category name contains `keyword`, ignoring case.
///
/// The keyword is matched literally: `%`, `_` and `\` carry no wildcard
/// meaning. Case folding is SQLite `LIKE` folding, ASCII only: `"école"`
/// does not match `"ÉCOLE"`. An empty keyword matches every item.
pub fn search_items(conn: &Connection, keyword: &str) -> Result<Vec<ItemView>> {
    let pattern = format!("%{}%", escape_like(keyword));
    let q = format!(
        r"SELECT {VIEW_COLS} {VIEW_FROM}
         WHERE items.name LIKE ?1 ESCAPE '\' OR categories.name LIKE ?1 ESCAPE '\'
         ORDER BY items.id ASC"
    );
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([pattern], ItemView::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Escape the `LIKE` metacharacters of `raw` with a backslash.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
