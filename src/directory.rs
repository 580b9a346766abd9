//! Locating the configuration directory before binding.
//!
//! The directory has to be known before the binder runs, so it cannot be a
//! bound field itself. These helpers look it up with a simpler chain:
//! environment variable, then flag, then a fallback path.

use camino::Utf8PathBuf;

use crate::layers::cli::find_flag_value;
use crate::layers::env::{EnvSource, StdEnv};

/// Resolve the configuration directory from the process environment and arguments.
///
/// Checks the environment variable `env_key`, then the flag `flag_key`, then
/// falls back to `default`. An empty key skips that source; an empty value
/// counts as unset.
///
/// ```rust,no_run
/// let dir = layerbind::retrieve_config_directory("CONFIGDIR", "configdir", "/config");
/// ```
pub fn retrieve_config_directory(env_key: &str, flag_key: &str, default: &str) -> Utf8PathBuf {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    retrieve_config_directory_from(&StdEnv, &args, env_key, flag_key, default)
}

/// Like [`retrieve_config_directory`], with explicit sources.
pub fn retrieve_config_directory_from<S: AsRef<str>>(
    env: &dyn EnvSource,
    args: &[S],
    env_key: &str,
    flag_key: &str,
    default: &str,
) -> Utf8PathBuf {
    if !env_key.is_empty()
        && let Some(value) = env.get(env_key).filter(|v| !v.is_empty())
    {
        tracing::debug!(env = env_key, dir = %value, "config directory from environment");
        return Utf8PathBuf::from(value);
    }

    if !flag_key.is_empty()
        && let Some(value) = find_flag_value(args, flag_key).filter(|v| !v.is_empty())
    {
        tracing::debug!(flag = flag_key, dir = %value, "config directory from flag");
        return Utf8PathBuf::from(value);
    }

    tracing::debug!(dir = default, "config directory from fallback");
    Utf8PathBuf::from(default)
}
