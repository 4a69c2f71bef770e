//! Mercato - marketplace listing service
//!
//! This library crate exposes the catalog, image store, and HTTP server for
//! the binary and for integration testing.

pub mod catalog;
pub mod config;
pub mod images;
pub mod server;
