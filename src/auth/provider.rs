use std::process::{Command, Stdio};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::claims::unsigned_token;
use crate::cli::output;
use crate::config::ProviderKind;
use crate::error::AuthError;

/// What `login` asks a provider for.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    /// Tenant to sign in to; `"common"` means "whatever the account's home is".
    pub tenant: String,
    pub use_device_code: bool,
    /// How long the demo device-code flow pretends to wait.
    pub device_code_wait: Duration,
}

/// A credential handed back by a provider. Never persisted.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub tenant_id: Option<String>,
    pub expires_on: Option<DateTime<Utc>>,
}

/// Source of access tokens. Object-safe.
pub trait CredentialProvider {
    fn kind(&self) -> ProviderKind;

    /// Whether this provider can run on the current system.
    fn is_available(&self) -> bool;

    /// Run the sign-in flow and return a token.
    fn acquire_token(&self, request: &LoginRequest) -> Result<AccessToken, AuthError>;

    /// Drop any session the provider keeps outside of this CLI.
    fn sign_out(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

// -------------------------------------------------------------------
// Demo provider
// -------------------------------------------------------------------

pub const DEMO_USER: &str = "user@example.com";
pub const DEVICE_LOGIN_URL: &str = "https://microsoft.com/devicelogin";

/// Fabricates a sign-in locally. Always available.
pub struct DemoProvider;

impl DemoProvider {
    fn claims(tenant: &str, expires_on: DateTime<Utc>) -> serde_json::Value {
        serde_json::json!({
            "upn": DEMO_USER,
            "name": "Demo User",
            "tid": tenant,
            "tenant_name": "MyCliApp Demo",
            "oid": uuid::Uuid::new_v4().to_string(),
            "roles": ["Reader"],
            "exp": expires_on.timestamp(),
        })
    }

    fn simulate_device_code(wait: Duration) {
        output::header("🔐 Device Authentication Required");
        println!("\nTo sign in, use a web browser to open the page:");
        output::highlight(DEVICE_LOGIN_URL);
        println!("\nAnd enter the code: {}", output::emphasis(&user_code()));
        println!();

        let spinner = output::spinner("Waiting for authentication...");
        std::thread::sleep(wait);
        spinner.finish_and_clear();
    }
}

impl CredentialProvider for DemoProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Demo
    }

    fn is_available(&self) -> bool {
        true
    }

    fn acquire_token(&self, request: &LoginRequest) -> Result<AccessToken, AuthError> {
        if request.use_device_code {
            Self::simulate_device_code(request.device_code_wait);
        }

        let expires_on = Utc::now() + chrono::TimeDelta::hours(1);
        Ok(AccessToken {
            token: unsigned_token(&Self::claims(&request.tenant, expires_on)),
            tenant_id: Some(request.tenant.clone()),
            expires_on: Some(expires_on),
        })
    }
}

/// Short code in the `ABCD-1234` shape device-login pages expect.
fn user_code() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{}-{}", &hex[..4], &hex[4..8])
}

// -------------------------------------------------------------------
// Azure CLI provider
// -------------------------------------------------------------------

/// Delegates sign-in to the external `az` identity tool.
pub struct AzureCliProvider {
    binary: String,
}

impl Default for AzureCliProvider {
    fn default() -> Self {
        Self {
            binary: "az".to_string(),
        }
    }
}

impl AzureCliProvider {
    fn login_args(request: &LoginRequest) -> Vec<String> {
        let mut args = vec!["login".to_string(), "--output".into(), "none".into()];
        if request.use_device_code {
            args.push("--use-device-code".into());
        }
        args.extend(tenant_args(&request.tenant));
        args
    }

    fn token_args(request: &LoginRequest) -> Vec<String> {
        let mut args = vec![
            "account".to_string(),
            "get-access-token".into(),
            "--output".into(),
            "json".into(),
        ];
        args.extend(tenant_args(&request.tenant));
        args
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.binary, args.join(" "))
    }
}

fn tenant_args(tenant: &str) -> Vec<String> {
    if tenant.is_empty() || tenant == "common" {
        Vec::new()
    } else {
        vec!["--tenant".into(), tenant.to_string()]
    }
}

impl CredentialProvider for AzureCliProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::AzureCli
    }

    fn is_available(&self) -> bool {
        crate::platform::command_exists(&self.binary)
    }

    fn acquire_token(&self, request: &LoginRequest) -> Result<AccessToken, AuthError> {
        // interactive: the tool owns the terminal for browser/device-code prompts
        let login_args = Self::login_args(request);
        tracing::debug!(command = %self.describe(&login_args), "delegating sign-in");
        let status = Command::new(&self.binary)
            .args(&login_args)
            .status()
            .map_err(|e| AuthError::CommandFailed {
                command: self.describe(&login_args),
                detail: e.to_string(),
            })?;
        if !status.success() {
            return Err(AuthError::CommandFailed {
                command: self.describe(&login_args),
                detail: format!("exited with {status}"),
            });
        }

        let token_args = Self::token_args(request);
        let output = Command::new(&self.binary)
            .args(&token_args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| AuthError::CommandFailed {
                command: self.describe(&token_args),
                detail: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(AuthError::CommandFailed {
                command: self.describe(&token_args),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_access_token(&String::from_utf8_lossy(&output.stdout))
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        let args = vec!["logout".to_string()];
        let output = Command::new(&self.binary)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| AuthError::CommandFailed {
                command: self.describe(&args),
                detail: e.to_string(),
            })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(AuthError::CommandFailed {
                command: self.describe(&args),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessTokenResponse {
    access_token: Option<String>,
    tenant: Option<String>,
    #[serde(rename = "expires_on")]
    expires_on: Option<i64>,
}

/// Parse the JSON printed by `az account get-access-token`.
fn parse_access_token(stdout: &str) -> Result<AccessToken, AuthError> {
    let response: AccessTokenResponse = serde_json::from_str(stdout)?;
    let token = response
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidResponse("missing accessToken".into()))?;

    Ok(AccessToken {
        token,
        tenant_id: response.tenant,
        expires_on: response
            .expires_on
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
    })
}

// -------------------------------------------------------------------
// Provider resolution
// -------------------------------------------------------------------

/// Map a configured kind onto the provider that will actually run.
///
/// `az_available` is checked once by the caller so every consumer in an
/// invocation sees the same answer.
pub fn effective_kind(
    requested: ProviderKind,
    az_available: bool,
) -> Result<ProviderKind, AuthError> {
    match requested {
        ProviderKind::Demo => Ok(ProviderKind::Demo),
        ProviderKind::AzureCli if az_available => Ok(ProviderKind::AzureCli),
        ProviderKind::AzureCli => Err(AuthError::ProviderUnavailable(
            ProviderKind::AzureCli.to_string(),
        )),
        ProviderKind::Auto if az_available => Ok(ProviderKind::AzureCli),
        ProviderKind::Auto => Ok(ProviderKind::Demo),
    }
}

/// Build the provider for a kind. `Auto` looks for `az` on `PATH`.
pub fn provider_for(kind: ProviderKind) -> Box<dyn CredentialProvider> {
    match kind {
        ProviderKind::Demo => Box::new(DemoProvider),
        ProviderKind::AzureCli => Box::new(AzureCliProvider::default()),
        ProviderKind::Auto => {
            let az = AzureCliProvider::default();
            if az.is_available() {
                Box::new(az)
            } else {
                Box::new(DemoProvider)
            }
        }
    }
}

/// Pick the provider for this invocation.
///
/// `force_demo` (from `login --demo`) wins over configuration. An explicitly
/// configured provider that is not installed is an error rather than a
/// silent fallback.
pub fn resolve_provider(
    configured: ProviderKind,
    force_demo: bool,
) -> Result<Box<dyn CredentialProvider>, AuthError> {
    let requested = if force_demo {
        ProviderKind::Demo
    } else {
        configured
    };
    let az_available =
        requested != ProviderKind::Demo && AzureCliProvider::default().is_available();
    let kind = effective_kind(requested, az_available)?;
    tracing::debug!(configured = %configured, resolved = %kind, "credential provider selected");
    Ok(provider_for(kind))
}
