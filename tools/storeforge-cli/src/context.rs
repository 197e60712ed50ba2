//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storeforge_cache::FileStore;
use storeforge_commerce::notify::RecordingNotifier;
use storeforge_commerce::CartStore;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_file: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&Path>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_file) = match config_path {
            Some(path) => (CliConfig::load(path)?, Some(path.to_path_buf())),
            None => match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        if let Some(path) = &config_file {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_file,
            output,
            cwd,
        })
    }

    /// Directory holding the active profile's data.
    pub fn profile_dir(&self) -> PathBuf {
        let profile = &self.config.profile;
        let root = match &profile.data_dir {
            Some(dir) => self.resolve_path(dir),
            None => data_dir().join("storeforge").join("profiles"),
        };
        root.join(&profile.name)
    }

    /// Open the cart store for the active profile.
    ///
    /// Notifications are buffered so the command can echo them after it runs.
    pub fn open_cart(&self) -> Result<(CartStore<FileStore, RecordingNotifier>, RecordingNotifier)> {
        let dir = self.profile_dir();
        let storage = FileStore::open(&dir)
            .with_context(|| format!("Failed to open profile: {}", dir.display()))?;
        let notifier = RecordingNotifier::new();
        let cart = CartStore::open(storage, notifier.clone(), self.config.cart.clone());
        Ok((cart, notifier))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in `start` or any of its parents.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
