//! Content store abstraction for the shelf content server.
//!
//! This crate provides a [`Store`] trait for existence checks and content
//! retrieval across the category / content / attachment hierarchy. This
//! enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** behind a small object-safe trait
//! - **Clean separation** between path resolution logic and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Store`] trait with existence checks, listings, and content reads
//! - [`FsStore`] implementation over a flat-file directory layout
//! - [`MockStore`] for testing (behind `mock` feature flag)
//!
//! Identifiers beginning with `.` are reserved markers: every backend
//! reports them as nonexistent and omits them from listings.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use shelf_store::{FsStore, Store};
//!
//! let store = FsStore::new(
//!     PathBuf::from("data"),
//!     PathBuf::from("views"),
//!     PathBuf::from("static"),
//! );
//! for (id, url) in store.categories()? {
//!     println!("{id}: {url}");
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod store;

pub use fs::FsStore;
#[cfg(feature = "mock")]
pub use mock::MockStore;
pub use store::{
    Store, StoreError, StoreErrorKind, attachment_url, category_url, content_url, is_hidden,
    validate_id,
};
