//! Mercato-Common: shared types and utilities.
//!
//! - **Typed IDs**: integer newtypes for categories and items
//! - **Path Utilities**: image extension allow-list and content types
//! - **Error Handling**: the error taxonomy shared by every crate
//!
//! # Examples
//!
//! ```
//! use mercato_common::{Error, ItemId, Result};
//! use mercato_common::paths::is_allowed_image;
//! use std::path::Path;
//!
//! let id = ItemId::from(7);
//! assert_eq!(id.get(), 7);
//!
//! assert!(is_allowed_image(Path::new("chair.PNG")));
//!
//! fn lookup() -> Result<()> {
//!     Err(Error::not_found("item", 9999))
//! }
//! assert_eq!(lookup().unwrap_err().http_status(), 404);
//! ```

pub mod error;
pub mod ids;
pub mod paths;

pub use error::{Error, Result};
pub use ids::*;
