//! Filesystem store implementation.
//!
//! Provides [`FsStore`] for serving the category hierarchy, view
//! templates, and static resources from local directories.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::store::{
    Store, StoreError, StoreErrorKind, attachment_url, category_url, content_url, is_hidden,
    validate_id,
};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Directory under the data root holding category directories.
const CATEGORIES_DIR: &str = "categories";

/// Directory under a category holding its content directories.
const CONTENTS_DIR: &str = "contents";

/// Directory under a content item holding its attachment files.
const ATTACHMENTS_DIR: &str = "attachments";

/// Markdown body filename inside a content directory.
const CONTENT_FILENAME: &str = "content.md";

/// View template file extension.
const VIEW_EXT: &str = "hbs";

/// Filesystem store implementation.
///
/// Reads a flat-file layout rooted at three directories:
///
/// ```text
/// <data>/categories/<category>/contents/<content>/content.md
/// <data>/categories/<category>/contents/<content>/attachments/<attachment>
/// <views>/<name>.hbs
/// <static>/<path>
/// ```
///
/// Categories and content items are directories; attachments and static
/// resources are plain files. Entries with the hidden marker prefix are
/// invisible to every query.
pub struct FsStore {
    /// Root directory of the category hierarchy.
    data_dir: PathBuf,
    /// Directory holding view templates.
    views_dir: PathBuf,
    /// Directory holding static resources.
    static_dir: PathBuf,
}

impl FsStore {
    /// Create a new filesystem store over the given directories.
    #[must_use]
    pub fn new(data_dir: PathBuf, views_dir: PathBuf, static_dir: PathBuf) -> Self {
        Self {
            data_dir,
            views_dir,
            static_dir,
        }
    }

    /// Resolve the directory of a category.
    fn category_dir(&self, category: &str) -> Result<PathBuf, StoreError> {
        validate_id(category)?;
        if is_hidden(category) {
            return Err(StoreError::not_found(category).with_backend(BACKEND));
        }
        Ok(self.data_dir.join(CATEGORIES_DIR).join(category))
    }

    /// Resolve the directory of a content item.
    fn content_dir(&self, category: &str, content: &str) -> Result<PathBuf, StoreError> {
        validate_id(content)?;
        if is_hidden(content) {
            return Err(StoreError::not_found(content).with_backend(BACKEND));
        }
        Ok(self.category_dir(category)?.join(CONTENTS_DIR).join(content))
    }

    /// Resolve the file path of an attachment.
    fn attachment_path(
        &self,
        category: &str,
        content: &str,
        attachment: &str,
    ) -> Result<PathBuf, StoreError> {
        validate_id(attachment)?;
        if is_hidden(attachment) {
            return Err(StoreError::not_found(attachment).with_backend(BACKEND));
        }
        Ok(self
            .content_dir(category, content)?
            .join(ATTACHMENTS_DIR)
            .join(attachment))
    }

    /// Map a relative URL path onto the static directory.
    ///
    /// Splits on `/`, drops empty segments, and treats hidden segments as
    /// nonexistent, which also rejects `..` traversal.
    fn static_path(&self, path: &str) -> Result<PathBuf, StoreError> {
        let mut full = self.static_dir.clone();
        let mut pushed = false;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if is_hidden(segment) {
                return Err(StoreError::not_found(path).with_backend(BACKEND));
            }
            full.push(segment);
            pushed = true;
        }
        if !pushed {
            return Err(StoreError::new(StoreErrorKind::InvalidId)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(full)
    }

    /// List visible entries of a directory, directories or files only.
    ///
    /// A missing directory yields an empty listing; any other I/O failure
    /// is reported.
    fn list_visible(dir: &Path, want_dir: bool) -> Result<Vec<String>, StoreError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(e, Some(dir.to_path_buf())).with_backend(BACKEND)),
        };

        Ok(entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_dir() == want_dir))
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| !is_hidden(name))
            .collect())
    }
}

impl Store for FsStore {
    fn category_exists(&self, category: &str) -> bool {
        let found = self.category_dir(category).is_ok_and(|p| p.is_dir());
        if !found {
            tracing::debug!(category, "category not found");
        }
        found
    }

    fn content_exists(&self, category: &str, content: &str) -> bool {
        let found = self
            .content_dir(category, content)
            .is_ok_and(|p| p.is_dir());
        if !found {
            tracing::debug!(category, content, "content not found");
        }
        found
    }

    fn attachment_exists(&self, category: &str, content: &str, attachment: &str) -> bool {
        let found = self
            .attachment_path(category, content, attachment)
            .is_ok_and(|p| p.is_file());
        if !found {
            tracing::debug!(category, content, attachment, "attachment not found");
        }
        found
    }

    fn categories(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let dir = self.data_dir.join(CATEGORIES_DIR);
        Ok(Self::list_visible(&dir, true)?
            .into_iter()
            .map(|id| {
                let url = category_url(&id);
                (id, url)
            })
            .collect())
    }

    fn contents(&self, category: &str) -> Result<BTreeMap<String, String>, StoreError> {
        let dir = match self.category_dir(category) {
            Ok(dir) => dir.join(CONTENTS_DIR),
            Err(e) if e.kind == StoreErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e),
        };
        Ok(Self::list_visible(&dir, true)?
            .into_iter()
            .map(|id| {
                let url = content_url(category, &id);
                (id, url)
            })
            .collect())
    }

    fn attachments(
        &self,
        category: &str,
        content: &str,
    ) -> Result<BTreeMap<String, String>, StoreError> {
        let dir = match self.content_dir(category, content) {
            Ok(dir) => dir.join(ATTACHMENTS_DIR),
            Err(e) if e.kind == StoreErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e),
        };
        Ok(Self::list_visible(&dir, false)?
            .into_iter()
            .map(|id| {
                let url = attachment_url(category, content, &id);
                (id, url)
            })
            .collect())
    }

    fn content_body(&self, category: &str, content: &str) -> Result<String, StoreError> {
        let path = self.content_dir(category, content)?.join(CONTENT_FILENAME);
        fs::read_to_string(&path)
            .map_err(|e| StoreError::io(e, Some(path.clone())).with_backend(BACKEND))
    }

    fn attachment_bytes(
        &self,
        category: &str,
        content: &str,
        attachment: &str,
    ) -> Result<Vec<u8>, StoreError> {
        let path = self.attachment_path(category, content, attachment)?;
        fs::read(&path).map_err(|e| StoreError::io(e, Some(path.clone())).with_backend(BACKEND))
    }

    fn view(&self, name: &str) -> Result<String, StoreError> {
        validate_id(name)?;
        if is_hidden(name) {
            return Err(StoreError::not_found(name).with_backend(BACKEND));
        }
        let path = self.views_dir.join(format!("{name}.{VIEW_EXT}"));
        fs::read_to_string(&path)
            .map_err(|e| StoreError::io(e, Some(path.clone())).with_backend(BACKEND))
    }

    fn static_exists(&self, path: &str) -> bool {
        self.static_path(path).is_ok_and(|p| p.is_file())
    }

    fn static_bytes(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let full = self.static_path(path)?;
        fs::read(&full).map_err(|e| StoreError::io(e, Some(full.clone())).with_backend(BACKEND))
    }
}
