//! Configuration management for the Folio search service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{FolioError, Result};
use crate::core::xdg::{XdgDirs, INDEX_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Content collection and index builder configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentConfig {
    /// Directory holding the markdown posts
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,

    /// Content file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Walk subdirectories of `posts_dir`
    #[serde(default)]
    pub recursive: bool,

    /// Paths to leave out of the build (glob syntax)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Maximum file size in KB (skip larger files)
    #[serde(default = "default_max_file_size_kb")]
    pub max_file_size_kb: u64,

    /// Thumbnail used when a post declares none
    #[serde(default = "default_thumbnail")]
    pub default_thumbnail: String,

    /// Characters kept in the searchable body excerpt
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,

    /// Reading speed used for the reading-time estimate
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: usize,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Location of the corpus artifact (JSON)
    #[serde(default = "default_index_file")]
    pub index_file: PathBuf,
}

/// Relative importance of each searchable field
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FieldWeights {
    #[serde(default = "default_title_weight")]
    pub title: f64,
    #[serde(default = "default_description_weight")]
    pub description: f64,
    #[serde(default = "default_body_weight")]
    pub body: f64,
    #[serde(default = "default_tags_weight")]
    pub tags: f64,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Results per page when the caller gives none (or an invalid one)
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Upper bound on the page size a caller may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Longer terms are truncated to this many characters
    #[serde(default = "default_max_term_chars")]
    pub max_term_chars: usize,

    /// Largest normalized edit distance still counted as a match
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Shortest span of text that may constitute a match
    #[serde(default = "default_min_match_chars")]
    pub min_match_chars: usize,

    #[serde(default)]
    pub weights: FieldWeights,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Build the index at startup when no artifact exists yet
    #[serde(default = "default_build_on_start")]
    pub build_on_start: bool,
}

// Default value functions
fn default_posts_dir() -> PathBuf {
    PathBuf::from("content/blog")
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_max_file_size_kb() -> u64 {
    1024
}

fn default_thumbnail() -> String {
    "/images/placeholder.jpg".to_string()
}

fn default_excerpt_chars() -> usize {
    1000
}

fn default_words_per_minute() -> usize {
    225
}

fn default_index_file() -> PathBuf {
    PathBuf::from("./data").join(INDEX_FILE_NAME)
}

fn default_title_weight() -> f64 {
    1.0
}

fn default_description_weight() -> f64 {
    0.8
}

fn default_body_weight() -> f64 {
    0.6
}

fn default_tags_weight() -> f64 {
    0.5
}

fn default_page_size() -> usize {
    9
}

fn default_max_page_size() -> usize {
    100
}

fn default_max_term_chars() -> usize {
    200
}

fn default_threshold() -> f64 {
    0.4
}

fn default_min_match_chars() -> usize {
    2
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3030
}

fn default_build_on_start() -> bool {
    true
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            posts_dir: default_posts_dir(),
            extension: default_extension(),
            recursive: false,
            exclude_patterns: Vec::new(),
            max_file_size_kb: default_max_file_size_kb(),
            default_thumbnail: default_thumbnail(),
            excerpt_chars: default_excerpt_chars(),
            words_per_minute: default_words_per_minute(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_file: default_index_file(),
        }
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: default_title_weight(),
            description: default_description_weight(),
            body: default_body_weight(),
            tags: default_tags_weight(),
        }
    }
}

impl FieldWeights {
    /// Weights as `(name, value)` pairs, in field order
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("title", self.title),
            ("description", self.description),
            ("body", self.body),
            ("tags", self.tags),
        ]
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_term_chars: default_max_term_chars(),
            threshold: default_threshold(),
            min_match_chars: default_min_match_chars(),
            weights: FieldWeights::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            build_on_start: default_build_on_start(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| FolioError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. FOLIO_CONFIG env var
    /// 2. XDG config file (~/.config/folio/config.toml)
    /// 3. ./folio.toml in the working directory
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("FOLIO_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("folio.toml").exists() {
                Self::from_file("folio.toml")?
            } else {
                Self::default()
            }
        };

        // Keep the index under the XDG data directory unless set explicitly
        if env::var("FOLIO_DATA_DIR").is_err() && config.storage.index_file == default_index_file()
        {
            config.storage.index_file = xdg.index_file();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(dir) = env::var("FOLIO_POSTS_DIR") {
            self.content.posts_dir = PathBuf::from(dir);
        }

        // Storage configuration
        if let Ok(file) = env::var("FOLIO_INDEX_FILE") {
            self.storage.index_file = PathBuf::from(file);
        } else if let Ok(data_dir) = env::var("FOLIO_DATA_DIR") {
            self.storage.index_file = PathBuf::from(data_dir).join(INDEX_FILE_NAME);
        }

        // Search configuration
        if let Some(size) = parse_env("FOLIO_PAGE_SIZE") {
            self.search.default_page_size = size;
        }
        if let Some(size) = parse_env("FOLIO_MAX_PAGE_SIZE") {
            self.search.max_page_size = size;
        }
        if let Some(threshold) = parse_env("FOLIO_THRESHOLD") {
            self.search.threshold = threshold;
        }
        if let Some(chars) = parse_env("FOLIO_MIN_MATCH_CHARS") {
            self.search.min_match_chars = chars;
        }

        // Server configuration
        if let Ok(host) = env::var("FOLIO_HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_env("FOLIO_PORT") {
            self.server.port = port;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.content.extension.trim_start_matches('.').is_empty() {
            return Err(FolioError::ConfigError(
                "Content extension must not be empty".to_string(),
            ));
        }

        if self.content.excerpt_chars == 0 {
            return Err(FolioError::ConfigError(
                "Excerpt length must be non-zero".to_string(),
            ));
        }

        if self.content.words_per_minute == 0 {
            return Err(FolioError::ConfigError(
                "Words per minute must be non-zero".to_string(),
            ));
        }

        if self.search.default_page_size == 0 {
            return Err(FolioError::ConfigError(
                "Default page size must be non-zero".to_string(),
            ));
        }

        if self.search.default_page_size > self.search.max_page_size {
            return Err(FolioError::ConfigError(
                "Default page size cannot exceed max page size".to_string(),
            ));
        }

        if self.search.max_term_chars == 0 {
            return Err(FolioError::ConfigError(
                "Max term length must be non-zero".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.search.threshold) {
            return Err(FolioError::ConfigError(format!(
                "Match threshold must be in [0, 1), got {}",
                self.search.threshold
            )));
        }

        if self.search.min_match_chars == 0 {
            return Err(FolioError::ConfigError(
                "Minimum match length must be non-zero".to_string(),
            ));
        }

        for (field, weight) in self.search.weights.entries() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(FolioError::ConfigError(format!(
                    "Weight for '{field}' must be a finite, non-negative number"
                )));
            }
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Posts dir: {:?}", self.content.posts_dir);
        tracing::info!(
            "  Extension: .{} (recursive: {})",
            self.content.extension,
            self.content.recursive
        );
        tracing::info!("  Excerpt: {} chars", self.content.excerpt_chars);
        tracing::info!("  Index file: {:?}", self.storage.index_file);
        tracing::info!(
            "  Page size: {} (max {})",
            self.search.default_page_size,
            self.search.max_page_size
        );
        tracing::info!(
            "  Threshold: {} (min match {} chars)",
            self.search.threshold,
            self.search.min_match_chars
        );
        tracing::info!("  Weights: {:?}", self.search.weights);
        tracing::info!("  Listen: {}:{}", self.server.host, self.server.port);
    }
}

/// Read and parse an environment variable, ignoring unparseable values
fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
