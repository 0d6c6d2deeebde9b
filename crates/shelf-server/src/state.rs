//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use shelf_render::MarkdownRenderer;
use shelf_store::Store;

use crate::views::ViewEngine;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Store backend for content, views, and static resources.
    pub(crate) store: Arc<dyn Store>,
    /// Markdown renderer for content bodies.
    pub(crate) renderer: MarkdownRenderer,
    /// View template engine.
    pub(crate) views: ViewEngine,
}
