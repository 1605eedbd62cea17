use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Which credential provider `login` should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    /// Use the external identity tool when it is installed, else the demo provider.
    #[default]
    Auto,
    Demo,
    AzureCli,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Auto => write!(f, "auto"),
            ProviderKind::Demo => write!(f, "demo"),
            ProviderKind::AzureCli => write!(f, "azure-cli"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ProviderKind::Auto),
            "demo" => Ok(ProviderKind::Demo),
            "azure-cli" | "az" => Ok(ProviderKind::AzureCli),
            other => Err(AuthError::UnknownProvider(other.to_string())),
        }
    }
}

/// Application settings read from the top level of `config.json`.
///
/// The `auth` object lives in the same document but is owned by
/// [`crate::auth::AuthStore`]; serde ignores it here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub auth_provider: ProviderKind,
    pub default_tenant: String,
    pub device_code_wait_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auth_provider: ProviderKind::Auto,
            default_tenant: "common".to_string(),
            device_code_wait_secs: 5,
        }
    }
}
