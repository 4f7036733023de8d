//! Validation of effective settings.

use crate::{ConfigError, MAX_FUZZY_DISTANCE, SearchSettings};

/// Rejects search settings the resolver cannot honour.
pub fn validate_search(search: &SearchSettings) -> Result<(), ConfigError> {
    if search.default_limit == 0 {
        return Err(ConfigError::Invalid {
            key: "search.default_limit",
            message: "must be at least 1".into(),
        });
    }
    if search.fuzzy_distance > MAX_FUZZY_DISTANCE {
        return Err(ConfigError::Invalid {
            key: "search.fuzzy_distance",
            message: format!(
                "{} exceeds the maximum of {MAX_FUZZY_DISTANCE}",
                search.fuzzy_distance
            ),
        });
    }
    Ok(())
}
