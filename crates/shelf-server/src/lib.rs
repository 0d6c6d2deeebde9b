//! HTTP server for the Shelf content engine.
//!
//! Serves a hierarchical markdown content tree over HTTP:
//! - Rendered views for the home, category, and content levels
//! - Attachment and static resource streaming
//! - Fallback resolution that degrades to an ancestor page instead of
//!   answering 404
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use shelf_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 8080,
//!         data_dir: PathBuf::from("data"),
//!         views_dir: PathBuf::from("views"),
//!         static_dir: PathBuf::from("static"),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum fallback handler (shelf-server)
//!                        │
//!                        ├─► PathSegments::parse ──► dispatch (shelf-resolver)
//!                        │                               │
//!                        │                               └─► existence checks (shelf-store)
//!                        │
//!                        └─► respond: handlebars views / bytes with guessed mime
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod respond;
mod state;
mod views;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use shelf_render::MarkdownRenderer;
use shelf_store::FsStore;
use state::AppState;
use views::ViewEngine;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content data directory.
    pub data_dir: PathBuf,
    /// View template directory.
    pub views_dir: PathBuf,
    /// Static resource directory.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            views_dir: PathBuf::from("views"),
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Create shared store backend
    let store: Arc<dyn shelf_store::Store> = Arc::new(FsStore::new(
        config.data_dir.clone(),
        config.views_dir.clone(),
        config.static_dir.clone(),
    ));

    // Create app state
    let state = Arc::new(AppState {
        store,
        renderer: MarkdownRenderer::new().with_title_extraction(),
        views: ViewEngine::new(),
    });

    // Create router
    let app = app::create_router(state);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from a loaded Shelf config.
///
/// # Arguments
///
/// * `config` - Shelf configuration
#[must_use]
pub fn server_config_from_config(config: &shelf_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        data_dir: config.content_resolved.data_dir.clone(),
        views_dir: config.content_resolved.views_dir.clone(),
        static_dir: config.content_resolved.static_dir.clone(),
    }
}
