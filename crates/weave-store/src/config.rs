//! Store configuration from the environment.

use std::env;

use crate::StoreError;

/// Environment variable holding the store's base URL.
const URL_VAR: &str = "SUPABASE_URL";
/// Environment variable holding the anonymous API key.
const KEY_VAR: &str = "SUPABASE_ANON_KEY";
/// Environment variable holding the site owner's user id.
const OWNER_VAR: &str = "SITE_OWNER_ID";

/// Connection settings for the document store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the store, e.g. `https://project.supabase.co`.
    pub url: String,
    /// Anonymous API key sent with every request.
    pub anon_key: String,
    /// User id whose documents make up the site.
    pub owner_id: String,
}

impl StoreConfig {
    /// Reads the configuration from `SUPABASE_URL`, `SUPABASE_ANON_KEY`,
    /// and `SITE_OWNER_ID`.
    ///
    /// Any missing variable is fatal: the build cannot identify its corpus
    /// without all three.
    pub fn from_env() -> Result<Self, StoreError> {
        Ok(Self {
            url: require_env(URL_VAR)?,
            anon_key: require_env(KEY_VAR)?,
            owner_id: require_env(OWNER_VAR)?,
        })
    }
}

/// Reads one environment variable, treating absent and empty as missing.
fn require_env(name: &str) -> Result<String, StoreError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(StoreError::MissingEnv {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variable_is_reported_by_name() {
        let err = require_env("WEAVE_TEST_UNSET_VARIABLE").unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required environment variable: WEAVE_TEST_UNSET_VARIABLE"
        );
    }
}
