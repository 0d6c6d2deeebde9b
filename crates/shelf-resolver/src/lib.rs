//! Request path resolution for the shelf content server.
//!
//! Interprets a request path as a walk down the category / content /
//! attachment hierarchy and selects the response behavior. Resolution is
//! deliberately forgiving: unknown names, reserved names, and malformed
//! paths all degrade to the nearest resolved ancestor instead of
//! failing, so every request maps to exactly one [`Action`].
//!
//! # Architecture
//!
//! - [`PathSegments`] - decoded, normalized path segments
//! - [`dispatch`] - the level-by-level walk against a
//!   [`shelf_store::Store`], producing an [`Action`]
//!
//! # Example
//!
//! ```ignore
//! use shelf_resolver::{Action, PathSegments, dispatch};
//!
//! let path = PathSegments::parse("/blog/post1/photo.png");
//! match dispatch(store.as_ref(), &path) {
//!     Action::Attachment { category, content, attachment } => { /* stream it */ }
//!     other => { /* render a view */ }
//! }
//! ```

mod dispatch;
mod segment;

pub use dispatch::{Action, RESERVED_NAMES, STATIC_SEGMENT, dispatch};
pub use segment::PathSegments;
