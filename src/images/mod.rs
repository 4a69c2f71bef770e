//! Content-addressed image storage.
//!
//! Uploaded bytes are stored under a filename derived from their SHA-256
//! digest, so identical uploads land on the same file and are written once.

mod storage;

pub use storage::{validate_image_type, ImageStorage, IMAGE_EXTENSION};
