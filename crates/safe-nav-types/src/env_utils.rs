//! Environment variable parsing utilities.
//!
//! Small helpers used when building engine configuration from the process
//! environment.
//!
//! # Example
//!
//! ```
//! use safe_nav_types::env_utils::{env_list, env_path};
//!
//! // If SAFE_NAV_VALUE_TYPES="Money, Currency" then returns vec!["Money", "Currency"]
//! let value_types: Vec<String> = env_list("SAFE_NAV_VALUE_TYPES");
//!
//! // Optional path to a configuration file
//! let config = env_path("SAFE_NAV_CONFIG");
//! ```

use std::path::PathBuf;

/// Read an environment variable as a path. Empty values count as unset.
pub fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Parse a comma-separated environment variable into a vector.
///
/// Returns an empty vector if the variable is not set. Blank entries are
/// skipped.
pub fn env_list(key: &str) -> Vec<String> {
    std::env::var(key)
        .ok()
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
