//! View template rendering.
//!
//! Views are handlebars templates loaded from the store on every
//! render, so a template edit shows up on the next request without a
//! server restart. The engine therefore keeps no registered templates,
//! only the shared handlebars registry configuration.

use std::collections::BTreeMap;

use handlebars::Handlebars;
use serde::Serialize;
use shelf_store::{Store, StoreError};
use thiserror::Error;

/// Name of the site-level listing view.
pub(crate) const HOME_VIEW: &str = "home";

/// Name of the category listing view.
pub(crate) const CATEGORY_VIEW: &str = "category";

/// Name of the content item view.
pub(crate) const CONTENT_VIEW: &str = "content";

/// Error raised while producing a rendered view.
#[derive(Debug, Error)]
pub(crate) enum ViewError {
    /// The template source could not be read from the store.
    #[error("failed to load view template: {0}")]
    Load(#[from] StoreError),
    /// The template could not be parsed or rendered.
    #[error("failed to render view template: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// One-shot handlebars renderer over store-backed templates.
pub(crate) struct ViewEngine {
    registry: Handlebars<'static>,
}

impl ViewEngine {
    pub(crate) fn new() -> Self {
        Self {
            registry: Handlebars::new(),
        }
    }

    /// Render the named view with the given parameters.
    pub(crate) fn render<T: Serialize>(
        &self,
        store: &dyn Store,
        name: &str,
        params: &T,
    ) -> Result<String, ViewError> {
        let source = store.view(name)?;
        Ok(self.registry.render_template(&source, params)?)
    }
}

/// Parameters for the home view.
#[derive(Debug, Serialize)]
pub(crate) struct HomeParams {
    /// Categories as id to access URL.
    pub(crate) categories: BTreeMap<String, String>,
}

/// Parameters for the category view.
#[derive(Debug, Serialize)]
pub(crate) struct CategoryParams {
    /// Category identifier.
    pub(crate) category: String,
    /// Content items as id to access URL.
    pub(crate) contents: BTreeMap<String, String>,
}

/// Parameters for the content view.
#[derive(Debug, Serialize)]
pub(crate) struct ContentParams {
    /// Category identifier.
    pub(crate) category: String,
    /// Content item identifier.
    pub(crate) content: String,
    /// Title taken from the body's first heading, if any.
    pub(crate) title: Option<String>,
    /// Markdown body rendered to HTML.
    pub(crate) body: String,
    /// Attachments as id to access URL.
    pub(crate) attachments: BTreeMap<String, String>,
}
