//! Configuration system for locus.
//!
//! locus uses TOML configuration files named `.locus.toml`. Configuration is resolved by walking
//! up the directory tree from a starting directory, collecting any `.locus.toml` files found,
//! then loading `~/.locus.toml` as the global config with lowest precedence.
//!
//! ```toml
//! [index]
//! path = "./gazetteer"
//!
//! [search]
//! default_limit = 10
//! fuzzy = true
//! fuzzy_distance = 2
//! ranking = "population_then_score"
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod ranking;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawIndexSettings, RawSearchSettings, parse_config_file, parse_config_str};
pub use ranking::RankingPolicy;
use serde::{Deserialize, Serialize};

/// Directory name for locus data (sibling to `.locus.toml`).
const LOCUS_DIR: &str = ".locus";
/// Subdirectory within `.locus` holding the name index.
const INDEX_DIR: &str = "index";

/// Default number of candidates returned when the caller gives no limit.
pub const DEFAULT_LIMIT: usize = 10;

/// Largest edit distance the fuzzy phase supports.
pub const MAX_FUZZY_DISTANCE: u8 = 2;

/// Top-level merged configuration for locus.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.locus.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Index location settings.
    pub index: IndexSettings,
    /// Search-related settings.
    pub search: SearchSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.locus.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let config = merge_configs(&parsed)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the effective settings for values the resolver cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::validate_search(&self.search)
    }

    /// Returns the index directory.
    ///
    /// An explicit `[index] path` wins; otherwise the index lives in `.locus/index/`
    /// next to the most specific config file. Returns `None` when neither is known.
    pub fn index_directory(&self) -> Option<PathBuf> {
        if let Some(path) = &self.index.path {
            return Some(path.clone());
        }
        self.config_root
            .as_ref()
            .map(|root| root.join(LOCUS_DIR).join(INDEX_DIR))
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            index: &self.index,
            search: &self.search,
        };
        toml::to_string_pretty(&serializable).map_err(ConfigError::Serialize)
    }
}

/// Where the name index lives.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Index directory, resolved to an absolute path during merging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Search-related settings, held by each resolver instance.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum candidates returned when the caller gives no limit.
    pub default_limit: usize,
    /// Whether the fuzzy fallback is allowed when the caller does not say.
    pub fuzzy: bool,
    /// Maximum Levenshtein distance for the fuzzy phase.
    pub fuzzy_distance: u8,
    /// Whether a transposition counts as a single edit.
    pub transpositions: bool,
    /// Sort order applied to every search.
    pub ranking: RankingPolicy,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            fuzzy: true,
            fuzzy_distance: MAX_FUZZY_DISTANCE,
            transpositions: true,
            ranking: RankingPolicy::default(),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Index location settings.
    index: &'a IndexSettings,
    /// Search-related settings.
    search: &'a SearchSettings,
}
