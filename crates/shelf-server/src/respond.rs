//! Response production.
//!
//! Turns a resolved [`Action`] into an HTTP response. A resource that
//! vanishes between resolution and the read here re-enters the action
//! table through [`Action::Redirect`] instead of failing, so the same
//! fallback chain applies at both stages.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use shelf_resolver::Action;
use shelf_store::{StoreError, StoreErrorKind};

use crate::error::ServerError;
use crate::state::AppState;
use crate::views::{self, CategoryParams, ContentParams, HomeParams};

/// Content type for rendered views.
const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Produce the response for a resolved action.
///
/// # Errors
///
/// Returns [`ServerError`] when a store read fails for a reason other
/// than a vanished resource, or when a view template cannot be
/// rendered.
pub(crate) fn respond(state: &AppState, mut action: Action) -> Result<Response, ServerError> {
    loop {
        action = match action {
            Action::Redirect(inner) => *inner,
            Action::Home => return home_page(state),
            Action::Category { category } => return category_page(state, &category),
            Action::Content { category, content } => {
                return content_page(state, &category, &content);
            }
            Action::Attachment {
                category,
                content,
                attachment,
            } => match state.store.attachment_bytes(&category, &content, &attachment) {
                Ok(bytes) => return Ok(bytes_response(&attachment, bytes)),
                Err(err) if vanished(&err) => {
                    tracing::warn!(
                        category = %category,
                        content = %content,
                        attachment = %attachment,
                        "Attachment vanished after resolution, serving its content item",
                    );
                    Action::Redirect(Box::new(Action::Content { category, content }))
                }
                Err(err) => return Err(err.into()),
            },
            Action::Static { path } => match state.store.static_bytes(&path) {
                Ok(bytes) => return Ok(bytes_response(&path, bytes)),
                Err(err) if vanished(&err) => {
                    tracing::warn!(
                        path = %path,
                        "Static resource vanished after resolution, serving home",
                    );
                    Action::Redirect(Box::new(Action::Home))
                }
                Err(err) => return Err(err.into()),
            },
        };
    }
}

/// True when the store reports the resource gone rather than unreadable.
///
/// Resolution checked existence moments earlier, so a miss here means
/// the resource was removed in between. Those degrade like resolution
/// misses; anything else is a real failure.
fn vanished(err: &StoreError) -> bool {
    err.kind == StoreErrorKind::NotFound
}

/// Render the home view with the category listing.
fn home_page(state: &AppState) -> Result<Response, ServerError> {
    let categories = state.store.categories()?;
    let html = state
        .views
        .render(state.store.as_ref(), views::HOME_VIEW, &HomeParams { categories })?;
    Ok(html_response(html))
}

/// Render a category's listing view.
fn category_page(state: &AppState, category: &str) -> Result<Response, ServerError> {
    let contents = state.store.contents(category)?;
    let params = CategoryParams {
        category: category.to_owned(),
        contents,
    };
    let html = state
        .views
        .render(state.store.as_ref(), views::CATEGORY_VIEW, &params)?;
    Ok(html_response(html))
}

/// Render a content item's view with its attachment listing.
///
/// A missing body renders as an empty page rather than failing: the
/// item directory is what resolution saw, and a body-less item is a
/// valid if sparse state of the data tree.
fn content_page(state: &AppState, category: &str, content: &str) -> Result<Response, ServerError> {
    let attachments = state.store.attachments(category, content)?;
    let body = match state.store.content_body(category, content) {
        Ok(body) => body,
        Err(err) if vanished(&err) => {
            tracing::warn!(
                category = %category,
                content = %content,
                "Content body missing, rendering an empty page",
            );
            String::new()
        }
        Err(err) => return Err(err.into()),
    };
    let rendered = state.renderer.render(&body);
    let params = ContentParams {
        category: category.to_owned(),
        content: content.to_owned(),
        title: rendered.title,
        body: rendered.html,
        attachments,
    };
    let html = state
        .views
        .render(state.store.as_ref(), views::CONTENT_VIEW, &params)?;
    Ok(html_response(html))
}

fn html_response(html: String) -> Response {
    ([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], html).into_response()
}

/// Stream raw bytes with a content type guessed from the file name.
fn bytes_response(name: &str, bytes: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(name).first_or_octet_stream();
    ([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use shelf_render::MarkdownRenderer;
    use shelf_store::MockStore;

    use super::*;
    use crate::views::ViewEngine;

    fn state_with(store: MockStore) -> AppState {
        AppState {
            store: Arc::new(store),
            renderer: MarkdownRenderer::new().with_title_extraction(),
            views: ViewEngine::new(),
        }
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn content_type(response: &Response) -> &str {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn test_home_renders_category_listing() {
        let state = state_with(
            MockStore::new()
                .with_category("blog")
                .with_view("home", "home:{{#each categories}}{{@key}};{{/each}}"),
        );

        let response = respond(&state, Action::Home).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(content_type(&response), "text/html; charset=utf-8");
        assert_eq!(body_string(response).await, "home:blog;");
    }

    #[tokio::test]
    async fn test_redirect_re_enters_the_table() {
        let state = state_with(MockStore::new().with_view("home", "home"));

        let response = respond(&state, Action::Redirect(Box::new(Action::Home))).unwrap();

        assert_eq!(body_string(response).await, "home");
    }

    #[tokio::test]
    async fn test_content_page_renders_markdown_body() {
        let state = state_with(
            MockStore::new()
                .with_body("blog", "post1", "# First Post")
                .with_view("content", "{{title}}|{{{body}}}"),
        );

        let response = respond(
            &state,
            Action::Content {
                category: "blog".to_owned(),
                content: "post1".to_owned(),
            },
        )
        .unwrap();

        assert_eq!(
            body_string(response).await,
            "First Post|<h1>First Post</h1>\n"
        );
    }

    #[tokio::test]
    async fn test_content_page_with_missing_body_is_empty() {
        let state = state_with(
            MockStore::new()
                .with_content("blog", "post2")
                .with_view("content", "[{{content}}|{{{body}}}]"),
        );

        let response = respond(
            &state,
            Action::Content {
                category: "blog".to_owned(),
                content: "post2".to_owned(),
            },
        )
        .unwrap();

        assert_eq!(body_string(response).await, "[post2|]");
    }

    #[tokio::test]
    async fn test_attachment_streams_bytes_with_mime() {
        let state = state_with(MockStore::new().with_attachment(
            "blog",
            "post1",
            "photo.png",
            b"\x89PNG".to_vec(),
        ));

        let response = respond(
            &state,
            Action::Attachment {
                category: "blog".to_owned(),
                content: "post1".to_owned(),
                attachment: "photo.png".to_owned(),
            },
        )
        .unwrap();

        assert_eq!(content_type(&response), "image/png");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.as_ref(), b"\x89PNG");
    }

    #[tokio::test]
    async fn test_unknown_extension_streams_octet_stream() {
        let state = state_with(MockStore::new().with_attachment(
            "blog",
            "post1",
            "dump.qqq",
            b"x".to_vec(),
        ));

        let response = respond(
            &state,
            Action::Attachment {
                category: "blog".to_owned(),
                content: "post1".to_owned(),
                attachment: "dump.qqq".to_owned(),
            },
        )
        .unwrap();

        assert_eq!(content_type(&response), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_vanished_attachment_serves_content_item() {
        let state = state_with(
            MockStore::new()
                .with_unreadable_attachment("blog", "post1", "photo.png")
                .with_view("content", "content:{{content}}"),
        );

        let response = respond(
            &state,
            Action::Attachment {
                category: "blog".to_owned(),
                content: "post1".to_owned(),
                attachment: "photo.png".to_owned(),
            },
        )
        .unwrap();

        assert_eq!(content_type(&response), "text/html; charset=utf-8");
        assert_eq!(body_string(response).await, "content:post1");
    }

    #[tokio::test]
    async fn test_static_streams_bytes_with_mime() {
        let state =
            state_with(MockStore::new().with_static("css/site.css", b"body {}".to_vec()));

        let response = respond(
            &state,
            Action::Static {
                path: "css/site.css".to_owned(),
            },
        )
        .unwrap();

        assert_eq!(content_type(&response), "text/css");
        assert_eq!(body_string(response).await, "body {}");
    }

    #[tokio::test]
    async fn test_vanished_static_serves_home() {
        let state = state_with(
            MockStore::new()
                .with_unreadable_static("css/site.css")
                .with_view("home", "home"),
        );

        let response = respond(
            &state,
            Action::Static {
                path: "css/site.css".to_owned(),
            },
        )
        .unwrap();

        assert_eq!(body_string(response).await, "home");
    }

    #[test]
    fn test_missing_view_template_is_fatal() {
        let state = state_with(MockStore::new());

        let err = respond(&state, Action::Home).unwrap_err();

        assert!(matches!(err, ServerError::View(_)));
    }
}
