pub mod schema;

use std::path::{Path, PathBuf};

pub use schema::{ProviderKind, Settings};

use crate::error::AuthError;

/// Name of the per-user configuration directory under `$HOME`.
pub const CONFIG_DIR_NAME: &str = ".mycli";

/// The JSON document holding settings and the persisted `auth` object.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Filesystem locations resolved once per invocation.
#[derive(Debug, Clone)]
pub struct Paths {
    pub config_dir: PathBuf,
}

impl Paths {
    /// Use `override_dir` when given (from `--config-dir` / `MYCLI_CONFIG_DIR`),
    /// otherwise `~/.mycli`.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self, AuthError> {
        let config_dir = match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_config_dir()?,
        };
        Ok(Self { config_dir })
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }
}

/// Return the default configuration directory (`~/.mycli`).
pub fn default_config_dir() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(CONFIG_DIR_NAME))
        .ok_or(AuthError::NoHomeDir)
}

/// Load [`Settings`] from the top level of the config document, then apply
/// environment overrides.
///
/// A missing file yields defaults. A malformed file is logged and also yields
/// defaults; settings never stop a command from running.
pub fn load_settings(config_file: &Path) -> Settings {
    let mut settings = read_settings_file(config_file).unwrap_or_default();
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn read_settings_file(config_file: &Path) -> Option<Settings> {
    let contents = std::fs::read_to_string(config_file).ok()?;
    match serde_json::from_str::<Settings>(&contents) {
        Ok(settings) => Some(settings),
        Err(error) => {
            tracing::warn!(
                %error,
                path = %config_file.display(),
                "ignoring malformed settings; using defaults"
            );
            None
        }
    }
}

fn apply_env_overrides(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    if let Some(raw) = env("MYCLI_AUTH_PROVIDER").filter(|v| !v.trim().is_empty()) {
        match raw.parse::<ProviderKind>() {
            Ok(kind) => settings.auth_provider = kind,
            Err(error) => tracing::warn!(%error, "ignoring MYCLI_AUTH_PROVIDER"),
        }
    }

    if let Some(raw) = env("MYCLI_DEVICE_CODE_WAIT_SECS") {
        match raw.trim().parse::<u64>() {
            Ok(secs) => settings.device_code_wait_secs = secs,
            Err(error) => tracing::warn!(%error, value = %raw, "ignoring MYCLI_DEVICE_CODE_WAIT_SECS"),
        }
    }
}
