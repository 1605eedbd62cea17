use anyhow::Result;

use crate::auth;
use crate::cli::{output, AppContext};
use crate::config::ProviderKind;

pub fn run(ctx: &mut AppContext) -> Result<()> {
    let Some(user_id) = ctx.store.user_info().map(|u| u.user_id.clone()) else {
        output::warning("No active login session found.");
        return Ok(());
    };

    output::warning("👋 Logging out...");

    // only touch the external tool's session if that is where ours came from
    if ctx.store.state().provider == Some(ProviderKind::AzureCli) {
        let provider = auth::provider_for(ProviderKind::AzureCli);
        if let Err(error) = provider.sign_out() {
            tracing::warn!(%error, "external sign-out failed");
            output::warning(&format!("Could not sign out of the identity tool: {}", error));
        }
    }

    ctx.store.clear();
    output::success(&format!("Successfully logged out from {}", user_id));
    Ok(())
}
