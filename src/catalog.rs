//! The catalog service: the one process-wide handle on persisted state.
//!
//! [`Catalog`] owns the database pool and the image store. It is opened
//! once at startup, shared with request handlers, and closed on shutdown.
//! All writes to either store go through it.

use std::fs::File;
use std::path::Path;

use bytes::Bytes;
use mercato_common::{Error, ItemId, Result};
use mercato_db::models::ItemView;
use mercato_db::pool::{self, DbPool};
use mercato_db::queries::{categories, items};
use rusqlite::TransactionBehavior;

use crate::config::StorageConfig;
use crate::images::{validate_image_type, ImageStorage};

/// An item submission.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub image: Option<ImageUpload>,
}

/// Raw image bytes as uploaded, with the client's filename.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-side filename; only its extension is inspected.
    pub filename: String,
    pub data: Bytes,
}

/// Catalog rows plus the image files they reference.
#[derive(Clone)]
pub struct Catalog {
    pool: DbPool,
    images: ImageStorage,
}

impl Catalog {
    /// Open the database and image root described by `storage`.
    ///
    /// Creates the database's parent directory and the image directory if
    /// they are missing, and runs pending migrations.
    pub fn open(storage: &StorageConfig) -> Result<Self> {
        if let Some(parent) = storage.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db_path = path_str(&storage.db_path)?;
        tracing::info!("Opening catalog database at {}", db_path);
        let pool = pool::init_pool(db_path, storage.pool_size)?;

        tracing::info!("Storing images in {}", storage.images_dir.display());
        let images = ImageStorage::open(&storage.images_dir)?;

        Ok(Self::new(pool, images))
    }

    /// Build a catalog from an existing pool and image store.
    pub fn new(pool: DbPool, images: ImageStorage) -> Self {
        Self { pool, images }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn images(&self) -> &ImageStorage {
        &self.images
    }

    /// Submit a new item, storing its image first if it has one.
    ///
    /// The image is persisted before any row is written, so a failed image
    /// write never leaves an item pointing at a missing file. The category
    /// lookup/creation and the item insert share one transaction.
    pub fn submit_item(&self, new_item: NewItem) -> Result<ItemView> {
        let NewItem {
            name,
            category,
            image,
        } = new_item;

        if name.is_empty() {
            return Err(Error::validation("item name must not be empty"));
        }
        if category.is_empty() {
            return Err(Error::validation("category name must not be empty"));
        }

        let image_name = match image {
            Some(upload) => {
                validate_image_type(&upload.filename)?;
                Some(self.images.store(&upload.data)?)
            }
            None => None,
        };

        let mut conn = pool::get_conn(&self.pool)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| Error::database(e.to_string()))?;

        let category_id = categories::resolve_or_create_category(&tx, &category)?;
        let id = items::create_item(&tx, &name, category_id, image_name.as_deref())?;
        let view = items::get_item(&tx, id)?
            .ok_or_else(|| Error::Internal(format!("item {id} missing after insert")))?;

        tx.commit().map_err(|e| Error::database(e.to_string()))?;

        tracing::info!(
            item_id = %id,
            name = %view.name,
            category = %view.category,
            image = ?view.image_name,
            "Item created"
        );
        Ok(view)
    }

    /// Look up one item; `None` when the id is unknown.
    pub fn get_item(&self, id: ItemId) -> Result<Option<ItemView>> {
        let conn = pool::get_conn(&self.pool)?;
        items::get_item(&conn, id)
    }

    /// All items in insertion order.
    pub fn list_items(&self) -> Result<Vec<ItemView>> {
        let conn = pool::get_conn(&self.pool)?;
        items::list_items(&conn)
    }

    /// Items whose name or category contains `keyword`, ignoring case.
    pub fn search_items(&self, keyword: &str) -> Result<Vec<ItemView>> {
        let conn = pool::get_conn(&self.pool)?;
        items::search_items(&conn, keyword)
    }

    /// Open a stored image by filename.
    pub fn open_image(&self, filename: &str) -> Result<File> {
        self.images.retrieve(filename)
    }

    /// Flush pending database state. Call once on shutdown.
    pub fn close(self) -> Result<()> {
        pool::checkpoint(&self.pool)?;
        tracing::info!("Catalog closed");
        Ok(())
    }
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| Error::validation(format!("path is not valid UTF-8: {}", path.display())))
}
