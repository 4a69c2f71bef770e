//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB, a temporary image
//! root, default config, and a full [`AppContext`]. The [`with_server`]
//! constructor starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use mercato::catalog::Catalog;
use mercato::config::Config;
use mercato::images::ImageStorage;
use mercato::server::{create_router, AppContext};
use mercato_db::pool::{init_memory_pool, DbPool};

/// Test harness wrapping a fully-constructed [`AppContext`] backed by an
/// in-memory database and a temporary image directory.
pub struct TestHarness {
    pub ctx: AppContext,
    pub db: DbPool,
    pub images_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration.
    ///
    /// The storage section is ignored; storage always lives in memory and
    /// in a temporary directory.
    pub fn with_config(config: Config) -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        let images_dir = tempfile::tempdir().expect("failed to create image dir");
        let images = ImageStorage::open(images_dir.path()).expect("failed to open image store");
        let catalog = Catalog::new(db.clone(), images);

        Self {
            ctx: AppContext::new(catalog, config),
            db,
            images_dir,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Number of files in the image root.
    pub fn image_count(&self) -> usize {
        std::fs::read_dir(self.images_dir.path())
            .expect("failed to read image dir")
            .count()
    }
}

/// Build the submission form used by `POST /items`.
pub fn item_form(name: &str, category: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("name", name.to_string())
        .text("category", category.to_string())
}

/// Build a submission form that carries an image part.
pub fn item_form_with_image(
    name: &str,
    category: &str,
    filename: &str,
    data: &[u8],
) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(data.to_vec()).file_name(filename.to_string());
    item_form(name, category).part("image", part)
}

/// Submit an item and return the raw response.
pub async fn post_item(addr: SocketAddr, form: reqwest::multipart::Form) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}/items"))
        .multipart(form)
        .send()
        .await
        .expect("request failed")
}
