//! Markdown rendering for the shelf content server.
//!
//! Converts content item bodies from markdown to HTML with GitHub
//! Flavored Markdown extensions, optionally lifting the first H1 heading
//! out as the page title.
//!
//! # Example
//!
//! ```
//! use shelf_render::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::new().with_title_extraction();
//! let result = renderer.render("# Hello\n\nSome **markdown**.");
//!
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! assert!(result.html.contains("<strong>markdown</strong>"));
//! ```

mod renderer;

pub use renderer::{MarkdownRenderer, RenderResult};
