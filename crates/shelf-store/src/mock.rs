//! Mock store implementation for testing.
//!
//! Provides [`MockStore`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};

use crate::store::{
    Store, StoreError, attachment_url, category_url, content_url, is_hidden,
};

/// Mock store for testing.
///
/// Holds the hierarchy in memory. Use the builder methods to configure
/// the mock with test data; `with_content` and `with_attachment` register
/// missing ancestors automatically.
///
/// # Example
///
/// ```ignore
/// use shelf_store::{MockStore, Store};
///
/// let store = MockStore::new()
///     .with_body("blog", "post1", "# Post 1")
///     .with_attachment("blog", "post1", "photo.png", b"\x89PNG".to_vec());
///
/// assert!(store.category_exists("blog"));
/// assert!(store.attachment_exists("blog", "post1", "photo.png"));
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    categories: BTreeSet<String>,
    contents: BTreeSet<(String, String)>,
    bodies: BTreeMap<(String, String), String>,
    attachment_data: BTreeMap<(String, String, String), Vec<u8>>,
    attachments: BTreeSet<(String, String, String)>,
    views: BTreeMap<String, String>,
    statics: BTreeSet<String>,
    static_data: BTreeMap<String, Vec<u8>>,
}

impl MockStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Add a content item, registering its category as well.
    ///
    /// The item has no body; `content_body` reports it missing.
    #[must_use]
    pub fn with_content(mut self, category: impl Into<String>, content: impl Into<String>) -> Self {
        let category = category.into();
        self.contents.insert((category.clone(), content.into()));
        self.categories.insert(category);
        self
    }

    /// Add a content item with a markdown body.
    #[must_use]
    pub fn with_body(
        self,
        category: impl Into<String>,
        content: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let content = content.into();
        let mut this = self.with_content(category.clone(), content.clone());
        this.bodies.insert((category, content), body.into());
        this
    }

    /// Add an attachment with bytes, registering its ancestors as well.
    #[must_use]
    pub fn with_attachment(
        self,
        category: impl Into<String>,
        content: impl Into<String>,
        attachment: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        let category = category.into();
        let content = content.into();
        let attachment = attachment.into();
        let mut this = self.with_unreadable_attachment(
            category.clone(),
            content.clone(),
            attachment.clone(),
        );
        this.attachment_data
            .insert((category, content, attachment), bytes.into());
        this
    }

    /// Register an attachment that answers existence checks but fails to
    /// read, to exercise the window between resolution and response.
    #[must_use]
    pub fn with_unreadable_attachment(
        self,
        category: impl Into<String>,
        content: impl Into<String>,
        attachment: impl Into<String>,
    ) -> Self {
        let category = category.into();
        let content = content.into();
        let mut this = self.with_content(category.clone(), content.clone());
        this.attachments
            .insert((category, content, attachment.into()));
        this
    }

    /// Add a view template source.
    #[must_use]
    pub fn with_view(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.views.insert(name.into(), source.into());
        self
    }

    /// Add a static resource with bytes.
    #[must_use]
    pub fn with_static(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        self.statics.insert(path.clone());
        self.static_data.insert(path, bytes.into());
        self
    }

    /// Register a static resource that answers existence checks but fails
    /// to read, to exercise the window between resolution and response.
    #[must_use]
    pub fn with_unreadable_static(mut self, path: impl Into<String>) -> Self {
        self.statics.insert(path.into());
        self
    }
}

impl Store for MockStore {
    fn category_exists(&self, category: &str) -> bool {
        !is_hidden(category) && self.categories.contains(category)
    }

    fn content_exists(&self, category: &str, content: &str) -> bool {
        !is_hidden(category)
            && !is_hidden(content)
            && self
                .contents
                .contains(&(category.to_owned(), content.to_owned()))
    }

    fn attachment_exists(&self, category: &str, content: &str, attachment: &str) -> bool {
        !is_hidden(category)
            && !is_hidden(content)
            && !is_hidden(attachment)
            && self.attachments.contains(&(
                category.to_owned(),
                content.to_owned(),
                attachment.to_owned(),
            ))
    }

    fn categories(&self) -> Result<BTreeMap<String, String>, StoreError> {
        Ok(self
            .categories
            .iter()
            .filter(|id| !is_hidden(id))
            .map(|id| (id.clone(), category_url(id)))
            .collect())
    }

    fn contents(&self, category: &str) -> Result<BTreeMap<String, String>, StoreError> {
        if is_hidden(category) {
            return Ok(BTreeMap::new());
        }
        Ok(self
            .contents
            .iter()
            .filter(|(c, i)| c.as_str() == category && !is_hidden(i))
            .map(|(_, i)| (i.clone(), content_url(category, i)))
            .collect())
    }

    fn attachments(
        &self,
        category: &str,
        content: &str,
    ) -> Result<BTreeMap<String, String>, StoreError> {
        if is_hidden(category) || is_hidden(content) {
            return Ok(BTreeMap::new());
        }
        Ok(self
            .attachments
            .iter()
            .filter(|(c, i, a)| c.as_str() == category && i.as_str() == content && !is_hidden(a))
            .map(|(_, _, a)| (a.clone(), attachment_url(category, content, a)))
            .collect())
    }

    fn content_body(&self, category: &str, content: &str) -> Result<String, StoreError> {
        self.bodies
            .get(&(category.to_owned(), content.to_owned()))
            .cloned()
            .ok_or_else(|| {
                StoreError::not_found(content_url(category, content)).with_backend("Mock")
            })
    }

    fn attachment_bytes(
        &self,
        category: &str,
        content: &str,
        attachment: &str,
    ) -> Result<Vec<u8>, StoreError> {
        self.attachment_data
            .get(&(
                category.to_owned(),
                content.to_owned(),
                attachment.to_owned(),
            ))
            .cloned()
            .ok_or_else(|| {
                StoreError::not_found(attachment_url(category, content, attachment))
                    .with_backend("Mock")
            })
    }

    fn view(&self, name: &str) -> Result<String, StoreError> {
        self.views
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(name).with_backend("Mock"))
    }

    fn static_exists(&self, path: &str) -> bool {
        !path.split('/').any(is_hidden) && self.statics.contains(path)
    }

    fn static_bytes(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        if path.split('/').any(is_hidden) {
            return Err(StoreError::not_found(path).with_backend("Mock"));
        }
        self.static_data
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::not_found(path).with_backend("Mock"))
    }
}
