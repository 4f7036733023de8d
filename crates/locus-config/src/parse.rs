//! Configuration file parsing.
//!
//! Parses individual `.locus.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{ConfigError, RankingPolicy};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Index location section.
    pub index: Option<RawIndexSettings>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
}

/// Raw index settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawIndexSettings {
    /// Index directory, relative to the declaring file unless absolute or tilde-prefixed.
    pub path: Option<String>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSearchSettings {
    /// Candidates returned when the caller gives no limit.
    #[serde(alias = "limit")]
    pub default_limit: Option<usize>,
    /// Whether the fuzzy fallback runs by default.
    pub fuzzy: Option<bool>,
    /// Fuzzy matching Levenshtein distance.
    pub fuzzy_distance: Option<u8>,
    /// Whether transpositions count as one edit.
    pub transpositions: Option<bool>,
    /// Result ordering.
    pub ranking: Option<RankingPolicy>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_str(&contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string.
pub fn parse_config_str(contents: &str) -> Result<RawConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Returns true if the file at `path` parses and declares `root = true`.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = parse_config_str(&contents) else {
        return false;
    };
    config.root == Some(true)
}
