//! XDG Base Directory support.
//!
//! Resolves where Folio keeps its config file, the built search index
//! and log output on Linux/Unix systems.

use std::env;
use std::fs;
use std::path::PathBuf;

/// Application directory name under each XDG base
const APP_DIR: &str = "folio";

/// File name of the corpus artifact inside the data directory
pub const INDEX_FILE_NAME: &str = "search-index.json";

/// XDG directory structure for Folio
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl XdgDirs {
    /// Resolve all directories
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit FOLIO_*_DIR env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.local/share, etc.)
    pub fn new() -> Self {
        Self {
            config_dir: resolve("FOLIO_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            data_dir: resolve("FOLIO_DATA_DIR", "XDG_DATA_HOME", &[".local", "share"]),
            state_dir: resolve("FOLIO_STATE_DIR", "XDG_STATE_HOME", &[".local", "state"]),
            cache_dir: resolve("FOLIO_CACHE_DIR", "XDG_CACHE_HOME", &[".cache"]),
        }
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        if let Ok(file) = env::var("FOLIO_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Default location of the built corpus
    pub fn index_file(&self) -> PathBuf {
        self.data_dir.join(INDEX_FILE_NAME)
    }

    /// Get logs directory path
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    /// Create config, data and log directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::info!(
            config = ?self.config_dir,
            data = ?self.data_dir,
            state = ?self.state_dir,
            cache = ?self.cache_dir,
            "XDG directories resolved"
        );
        tracing::info!("  Config file: {:?}", self.config_file());
        tracing::info!("  Index file: {:?}", self.index_file());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve one base directory: app override, then XDG var, then home default
fn resolve(app_var: &str, xdg_var: &str, home_parts: &[&str]) -> PathBuf {
    if let Ok(dir) = env::var(app_var) {
        return PathBuf::from(dir);
    }

    if let Ok(xdg) = env::var(xdg_var) {
        return PathBuf::from(xdg).join(APP_DIR);
    }

    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    for part in home_parts {
        path.push(part);
    }
    path.join(APP_DIR)
}
