//! Store trait and error types.
//!
//! Provides the core [`Store`] trait for existence checks and content
//! retrieval across the category / content / attachment hierarchy, along
//! with [`StoreError`] for unified error handling across backends.
//!
//! # Identifier Convention
//!
//! Categories, content items, and attachments are addressed by bare
//! identifiers, one per hierarchy level:
//! - `"blog"` - a category
//! - `"blog"`, `"post1"` - a content item inside a category
//! - `"blog"`, `"post1"`, `"photo.png"` - an attachment of a content item
//!
//! Identifiers beginning with `.` are reserved markers: every backend
//! reports them as nonexistent and omits them from listings. Callers may
//! rely on that contract instead of re-checking the prefix themselves.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// True if an identifier names a hidden entry.
///
/// Hidden entries (marker prefix `.`) never resolve and never appear in
/// listings, which also makes `..` unresolvable as an identifier.
#[must_use]
pub fn is_hidden(id: &str) -> bool {
    id.starts_with('.')
}

/// Validate that an identifier is usable as a single hierarchy level.
///
/// # Errors
///
/// Returns [`StoreErrorKind::InvalidId`] if the identifier is empty or
/// contains a path separator. Invalid arguments are reported distinctly
/// from [`StoreErrorKind::NotFound`]: an id that fails here was never a
/// name the hierarchy could contain.
pub fn validate_id(id: &str) -> Result<(), StoreError> {
    if id.is_empty() || id.contains(['/', '\\']) {
        return Err(StoreError::new(StoreErrorKind::InvalidId).with_path(id));
    }
    Ok(())
}

/// Access URL for a category listing entry.
#[must_use]
pub fn category_url(category: &str) -> String {
    format!("/{category}/")
}

/// Access URL for a content listing entry.
#[must_use]
pub fn content_url(category: &str, content: &str) -> String {
    format!("/{category}/{content}/")
}

/// Access URL for an attachment listing entry.
#[must_use]
pub fn attachment_url(category: &str, content: &str, attachment: &str) -> String {
    format!("/{category}/{content}/{attachment}")
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Identifier is empty or not a single path segment.
    InvalidId,
    /// Other/unknown error category.
    Other,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    /// Semantic error category.
    pub kind: StoreErrorKind,
    /// Path or identifier context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StoreErrorKind::NotFound).with_path(path)
    }

    /// Create a store error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StoreErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StoreErrorKind::PermissionDenied,
            _ => StoreErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Not found",
            StoreErrorKind::PermissionDenied => "Permission denied",
            StoreErrorKind::InvalidId => "Invalid identifier",
            StoreErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Store abstraction over the category / content / attachment hierarchy.
///
/// Provides a unified interface for existence checks, listings, and
/// content retrieval regardless of backend. Existence checks answer
/// `false` on errors (treats errors as "doesn't exist"); retrieval
/// methods report errors so callers can distinguish a vanished resource
/// from an unreadable one.
///
/// Listings map each visible identifier to its access URL (see
/// [`category_url`], [`content_url`], [`attachment_url`]). Hidden
/// entries are omitted; listing a nonexistent parent yields an empty
/// map, not an error.
pub trait Store: Send + Sync {
    /// Check if a category exists.
    ///
    /// Returns `false` on errors and for hidden identifiers.
    fn category_exists(&self, category: &str) -> bool;

    /// Check if a content item exists within a category.
    ///
    /// Returns `false` on errors and for hidden identifiers.
    fn content_exists(&self, category: &str, content: &str) -> bool;

    /// Check if an attachment exists within a content item.
    ///
    /// Returns `false` on errors and for hidden identifiers.
    fn attachment_exists(&self, category: &str, content: &str, attachment: &str) -> bool;

    /// List all categories as id to access URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the listing cannot be read.
    fn categories(&self) -> Result<BTreeMap<String, String>, StoreError>;

    /// List the content items of a category as id to access URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the listing cannot be read.
    fn contents(&self, category: &str) -> Result<BTreeMap<String, String>, StoreError>;

    /// List the attachments of a content item as id to access URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the listing cannot be read.
    fn attachments(
        &self,
        category: &str,
        content: &str,
    ) -> Result<BTreeMap<String, String>, StoreError>;

    /// Read the markdown body of a content item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the body doesn't exist or can't be read.
    fn content_body(&self, category: &str, content: &str) -> Result<String, StoreError>;

    /// Read the raw bytes of an attachment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the attachment doesn't exist or can't be read.
    fn attachment_bytes(
        &self,
        category: &str,
        content: &str,
        attachment: &str,
    ) -> Result<Vec<u8>, StoreError>;

    /// Read the source of a view template by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the view doesn't exist or can't be read.
    fn view(&self, name: &str) -> Result<String, StoreError>;

    /// Check if a static resource exists at the given relative path.
    ///
    /// Returns `false` on errors and for paths with hidden segments.
    fn static_exists(&self, path: &str) -> bool;

    /// Read the raw bytes of a static resource.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the resource doesn't exist or can't be read.
    fn static_bytes(&self, path: &str) -> Result<Vec<u8>, StoreError>;
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(".git"));
        assert!(is_hidden("."));
        assert!(is_hidden(".."));
        assert!(!is_hidden("blog"));
        assert!(!is_hidden("photo.png"));
    }

    #[test]
    fn test_validate_id_accepts_plain_names() {
        assert!(validate_id("blog").is_ok());
        assert!(validate_id("photo.png").is_ok());
        assert!(validate_id(".hidden").is_ok());
    }

    #[test]
    fn test_validate_id_rejects_empty() {
        let err = validate_id("").unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::InvalidId);
    }

    #[test]
    fn test_validate_id_rejects_separators() {
        assert_eq!(
            validate_id("a/b").unwrap_err().kind,
            StoreErrorKind::InvalidId
        );
        assert_eq!(
            validate_id("a\\b").unwrap_err().kind,
            StoreErrorKind::InvalidId
        );
    }

    #[test]
    fn test_access_urls() {
        assert_eq!(category_url("blog"), "/blog/");
        assert_eq!(content_url("blog", "post1"), "/blog/post1/");
        assert_eq!(
            attachment_url("blog", "post1", "photo.png"),
            "/blog/post1/photo.png"
        );
    }

    #[test]
    fn test_store_error_new() {
        let err = StoreError::new(StoreErrorKind::NotFound);

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert!(err.path.as_deref().is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_store_error_with_path() {
        let err = StoreError::new(StoreErrorKind::NotFound).with_path("/foo/bar");

        assert_eq!(err.path.as_deref(), Some(Path::new("/foo/bar")));
    }

    #[test]
    fn test_store_error_with_backend() {
        let err = StoreError::new(StoreErrorKind::NotFound).with_backend("Fs");

        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_store_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StoreError::new(StoreErrorKind::NotFound).with_source(io_err);

        assert!(err.downcast_source::<std::io::Error>().is_some());
    }

    #[test]
    fn test_store_error_not_found() {
        let err = StoreError::not_found("/foo/bar");

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("/foo/bar")));
    }

    #[test]
    fn test_store_error_io_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StoreError::io(io_err, Some(PathBuf::from("/foo/bar")));

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert_eq!(err.path.as_deref(), Some(Path::new("/foo/bar")));
    }

    #[test]
    fn test_store_error_io_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = StoreError::io(io_err, None);

        assert_eq!(err.kind, StoreErrorKind::PermissionDenied);
    }

    #[test]
    fn test_store_error_display_simple() {
        let err = StoreError::new(StoreErrorKind::NotFound);

        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_store_error_display_with_backend() {
        let err = StoreError::new(StoreErrorKind::NotFound).with_backend("Fs");

        assert_eq!(err.to_string(), "[Fs] Not found");
    }

    #[test]
    fn test_store_error_display_with_path() {
        let err = StoreError::new(StoreErrorKind::InvalidId).with_path("a/b");

        assert_eq!(err.to_string(), "Invalid identifier (path: a/b)");
    }

    #[test]
    fn test_store_error_display_full() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = StoreError::new(StoreErrorKind::NotFound)
            .with_backend("Fs")
            .with_path("/foo/bar")
            .with_source(io_err);

        assert_eq!(
            err.to_string(),
            "[Fs] Not found: file not found (path: /foo/bar)"
        );
    }

    #[test]
    fn test_store_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }
}
