//! Path resolution and dispatch.
//!
//! Walks a segmented request path against the content store one
//! hierarchy level at a time and selects the response action. Resolution
//! never fails: every unknown or reserved segment degrades to the
//! nearest resolved ancestor, bottoming out at the home view.

use shelf_store::Store;

use crate::segment::PathSegments;

/// Segment values that select the parent level's default view instead of
/// naming a child identifier.
pub const RESERVED_NAMES: [&str; 4] = ["", "home", "index", "default"];

/// First segment that routes into the static resource tree.
pub const STATIC_SEGMENT: &str = "static";

/// Additional reserved alias for a content item's own view.
const CONTENT_VIEW_NAME: &str = "view";

/// The response behavior selected for a request.
///
/// Resolution produces exactly one action per request. `Redirect` is
/// never produced by [`dispatch`]; responders use it to re-enter the
/// action table when a resource vanishes between resolution and
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Render the home view with the category listing.
    Home,
    /// Render a category's listing view.
    Category {
        category: String,
    },
    /// Render a content item's view.
    Content {
        category: String,
        content: String,
    },
    /// Stream an attachment's bytes.
    Attachment {
        category: String,
        content: String,
        attachment: String,
    },
    /// Stream a static resource.
    Static {
        /// Path relative to the static root.
        path: String,
    },
    /// Re-enter the action table with the wrapped action.
    Redirect(Box<Action>),
}

/// True if the segment selects the parent level's default view.
fn is_reserved(segment: &str) -> bool {
    RESERVED_NAMES.contains(&segment)
}

/// Resolve a segmented request path to its response action.
///
/// The rules apply in order, one hierarchy level at a time:
///
/// 1. No first segment, or a reserved one: home. `static` routes the
///    remaining segments into the static tree, or home when none remain.
/// 2. Unknown category: home.
/// 3. No second segment, or a reserved one: the category.
/// 4. Unknown content item: the category.
/// 5. No third segment, or a reserved one (here also `view`): the item.
/// 6. Unknown attachment: the item.
/// 7. Otherwise: the attachment. Segments past the third are ignored.
///
/// Identifiers with the hidden marker prefix never pass the store's
/// existence checks, so they degrade like any other unknown name.
#[must_use]
pub fn dispatch(store: &dyn Store, path: &PathSegments) -> Action {
    let Some(category) = path.get(0) else {
        return Action::Home;
    };
    if is_reserved(category) {
        return Action::Home;
    }
    if category == STATIC_SEGMENT {
        let rel = path.join_from(1);
        if rel.is_empty() {
            return Action::Home;
        }
        return Action::Static { path: rel };
    }
    if !store.category_exists(category) {
        return Action::Home;
    }

    let Some(content) = path.get(1) else {
        return Action::Category {
            category: category.to_owned(),
        };
    };
    if is_reserved(content) {
        return Action::Category {
            category: category.to_owned(),
        };
    }
    if !store.content_exists(category, content) {
        return Action::Category {
            category: category.to_owned(),
        };
    }

    let Some(attachment) = path.get(2) else {
        return Action::Content {
            category: category.to_owned(),
            content: content.to_owned(),
        };
    };
    if is_reserved(attachment) || attachment == CONTENT_VIEW_NAME {
        return Action::Content {
            category: category.to_owned(),
            content: content.to_owned(),
        };
    }
    if !store.attachment_exists(category, content, attachment) {
        return Action::Content {
            category: category.to_owned(),
            content: content.to_owned(),
        };
    }

    Action::Attachment {
        category: category.to_owned(),
        content: content.to_owned(),
        attachment: attachment.to_owned(),
    }
}
