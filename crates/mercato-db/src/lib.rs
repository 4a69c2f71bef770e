//! Mercato-DB: catalog persistence.
//!
//! SQLite storage with r2d2 connection pooling, embedded migrations, typed
//! row models and the category/item queries.
//!
//! # Example
//!
//! ```
//! use mercato_db::pool::{get_conn, init_memory_pool};
//! use mercato_db::queries::{categories, items};
//!
//! let pool = init_memory_pool().unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let furniture = categories::resolve_or_create_category(&conn, "furniture").unwrap();
//! let id = items::create_item(&conn, "Chair", furniture, None).unwrap();
//! let item = items::get_item(&conn, id).unwrap().unwrap();
//! assert_eq!(item.category, "furniture");
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
