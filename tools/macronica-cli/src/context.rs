//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use macronica_cache::FileStore;
use macronica_commerce::catalog::Catalog;
use macronica_commerce::notice::NoticeLog;
use macronica_commerce::CartStore;

use crate::config::CliConfig;
use crate::output::Output;

/// Cart store as the CLI uses it.
pub type CliCartStore = CartStore<FileStore, NoticeLog>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Product catalog.
    pub catalog: Catalog,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd, &output).unwrap_or_default()
        };

        if !config.output.color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        Ok(Self {
            config,
            output,
            cwd,
            catalog: Catalog::macronica(),
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path, output: &Output) -> Option<CliConfig> {
        let config_names = ["macronica.toml", ".macronica.toml", "macronica.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some(config),
                        Err(e) => output.warn(&format!("Skipping config: {:#}", e)),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Get the cart storage directory.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the cart store, restoring the saved cart.
    pub fn open_store(&self) -> CliCartStore {
        let dir = self.storage_dir();
        tracing::debug!(dir = %dir.display(), key = %self.config.storage.key, "opening cart store");
        CartStore::open_with_key(FileStore::open(dir), &self.config.storage.key, NoticeLog::new())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
