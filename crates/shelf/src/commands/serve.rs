//! `shelf serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use shelf_config::{CliSettings, Config};
use shelf_server::{run_server, server_config_from_config};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover shelf.toml).
    #[arg(short, long, env = "SHELF_CONFIG")]
    config: Option<PathBuf>,

    /// Content data directory (overrides config).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// View template directory (overrides config).
    #[arg(long)]
    views_dir: Option<PathBuf>,

    /// Static resource directory (overrides config).
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level directive (overrides config).
    #[arg(long)]
    log_level: Option<String>,

    /// Enable verbose output (debug-level logging).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Load config with CLI overrides applied
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;

        // Initialize tracing from the configured level; --verbose wins
        let level = if self.verbose {
            "debug"
        } else {
            config.log.level.as_str()
        };
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(level))
            .init();
        tracing::debug!(config = ?config.config_path, "Configuration loaded");

        if config.config_path.is_none() {
            output.warning("No shelf.toml found, using built-in defaults");
        }

        // Print startup info
        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Data directory: {}",
            config.content_resolved.data_dir.display()
        ));
        output.info(&format!(
            "Views directory: {}",
            config.content_resolved.views_dir.display()
        ));
        output.info(&format!(
            "Static directory: {}",
            config.content_resolved.static_dir.display()
        ));

        // Build server config and run
        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        output.success("Server stopped");
        Ok(())
    }

    /// Build config overrides from the parsed arguments.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            data_dir: self.data_dir.clone(),
            views_dir: self.views_dir.clone(),
            static_dir: self.static_dir.clone(),
            log_level: self.log_level.clone(),
        }
    }
}
