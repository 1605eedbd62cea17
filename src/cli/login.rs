use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;

use crate::auth::{self, LoginRequest, SessionDetails, TokenClaims};
use crate::cli::{output, AppContext};

#[derive(ClapArgs)]
pub struct Args {
    /// Tenant ID to authenticate with
    #[arg(long, short)]
    pub tenant: Option<String>,

    /// Use device code flow for authentication
    #[arg(long)]
    pub use_device_code: bool,

    /// Sign in with a fabricated demo identity
    #[arg(long)]
    pub demo: bool,
}

pub fn run(args: Args, ctx: &mut AppContext) -> Result<()> {
    if let Some(current) = ctx.store.user_info() {
        output::warning(&format!("Already logged in as: {}", current.user_id));
        if !output::confirm("Do you want to login with a different account?")? {
            output::info("Keeping the current session.");
            return Ok(());
        }
    }

    let provider = auth::resolve_provider(ctx.settings.auth_provider, args.demo)
        .context("Authentication failed")?;
    let tenant = args
        .tenant
        .unwrap_or_else(|| ctx.settings.default_tenant.clone());

    output::header(&format!(
        "🔐 Starting authentication ({} provider)...",
        provider.kind()
    ));
    if tenant != "common" {
        output::field("Tenant", &tenant);
    }

    let request = LoginRequest {
        tenant: tenant.clone(),
        use_device_code: args.use_device_code,
        device_code_wait: Duration::from_secs(ctx.settings.device_code_wait_secs),
    };
    let token = provider
        .acquire_token(&request)
        .context("Authentication failed")?;

    let claims = TokenClaims::from_token(&token.token).unwrap_or_else(|| {
        tracing::warn!("token claims unreadable; using placeholder identity");
        TokenClaims::placeholder()
    });
    let tenant_id = claims
        .tenant_id
        .clone()
        .or(token.tenant_id)
        .or(Some(tenant));
    let expires_on = claims.expires_at.or(token.expires_on);

    ctx.store.set_authenticated(
        claims.to_user_info(),
        tenant_id.clone(),
        SessionDetails {
            expires_on,
            provider: Some(provider.kind()),
        },
    );

    println!();
    output::success("Successfully authenticated!");
    output::field("User", &claims.user_id);
    if claims.display_name != claims.user_id {
        output::field("Name", &claims.display_name);
    }
    if let Some(tenant_id) = &tenant_id {
        output::field("Tenant", tenant_id);
    }
    if let Some(expires_on) = expires_on {
        output::field(
            "Token expires",
            &expires_on
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        );
    }
    Ok(())
}
