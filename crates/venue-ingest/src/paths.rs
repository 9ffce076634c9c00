//! Import profile path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the profile location.
pub const PROFILE_ENV_VAR: &str = "VENUE_PROFILE";

/// Get the default profile path.
///
/// Resolution order:
/// 1. `VENUE_PROFILE` environment variable
/// 2. `profile/catalog.toml` relative to the workspace root
pub fn default_profile_path() -> PathBuf {
    if let Ok(path) = std::env::var(PROFILE_ENV_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../profile/catalog.toml")
}

/// An explicit path (from the command line) wins over the defaults.
pub fn resolve_profile_path(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(default_profile_path, Path::to_path_buf)
}
