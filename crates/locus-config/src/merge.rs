//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::{
    Config, ConfigError, IndexSettings, SearchSettings,
    parse::{RawConfig, RawSearchSettings},
};

/// A parsed config file with its source path.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every setting the first defined value wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let search = merge_search_settings(configs);
    let index = merge_index_settings(configs)?;
    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Ok(Config {
        index,
        search,
        config_root,
    })
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.default_limit {
        result.default_limit = v;
    }
    if let Some(v) = raw.fuzzy {
        result.fuzzy = v;
    }
    if let Some(v) = raw.fuzzy_distance {
        result.fuzzy_distance = v;
    }
    if let Some(v) = raw.transpositions {
        result.transpositions = v;
    }
    if let Some(v) = raw.ranking {
        result.ranking = v;
    }
}

/// Picks the index path from the closest file that declares one.
///
/// The path is resolved against the directory of the file that declared it.
fn merge_index_settings(configs: &[ParsedConfig]) -> Result<IndexSettings, ConfigError> {
    for parsed in configs {
        let Some(raw) = parsed.config.index.as_ref().and_then(|i| i.path.as_deref()) else {
            continue;
        };
        let config_dir = parsed.path.parent().unwrap_or_else(|| Path::new("."));
        return Ok(IndexSettings {
            path: Some(resolve_index_path(raw, config_dir)?),
        });
    }
    Ok(IndexSettings::default())
}

/// Resolves an index path to an absolute path.
///
/// Tilde paths expand to the home directory; relative paths resolve against
/// `config_dir`. The directory need not exist yet.
pub(crate) fn resolve_index_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(config_dir.join(expanded))
    }
}

/// Expands a leading `~` or `~/` to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the user's home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
