use anyhow::Result;

use crate::auth::{self, CredentialProvider};
use crate::cli::{output, AppContext, VERSION};
use crate::platform;

pub fn run(ctx: &AppContext) -> Result<()> {
    output::header("📊 System Status:");
    output::status_field("Service", "Online", true);

    match ctx.store.user_info() {
        Some(user) => {
            output::status_field("Authentication", &format!("Active ({})", user.user_id), true)
        }
        None => output::status_field("Authentication", "Not authenticated", false),
    }

    let az_available = auth::provider::AzureCliProvider::default().is_available();
    match auth::effective_kind(ctx.settings.auth_provider, az_available) {
        Ok(kind) => output::field("Credential provider", &kind.to_string()),
        Err(error) => {
            tracing::debug!(%error, "configured provider unavailable");
            output::status_field(
                "Credential provider",
                &format!("{} (unavailable)", ctx.settings.auth_provider),
                false,
            );
        }
    }

    if az_available {
        output::status_field("Identity tool (az)", "Available", true);
    } else {
        output::status_field("Identity tool (az)", "Not installed", false);
    }

    output::field("Version", VERSION);
    output::field("Platform", &platform::detect_platform().display_detailed());
    output::field(
        "Config directory",
        &ctx.paths.config_dir.display().to_string(),
    );
    Ok(())
}
