//! Host platform utility functions

use std::path::PathBuf;

/// Name of the environment variable pointing at the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "POINTNAV_SW_ROOT";

/// Get the software root directory from the environment.
///
/// The root directory is where the `params` and `sessions` directories live.
pub fn get_pointnav_sw_root() -> Result<PathBuf, std::env::VarError> {
    let root = std::env::var(SW_ROOT_ENV_VAR)?;
    Ok(PathBuf::from(root))
}
