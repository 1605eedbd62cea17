use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::cli::{output, AppContext};

pub const NOT_AUTHENTICATED: &str = "Not authenticated. Use 'mycli login' to authenticate.";

pub fn run(ctx: &AppContext) -> Result<()> {
    let Some(user) = ctx.store.user_info() else {
        output::warning(NOT_AUTHENTICATED);
        return Ok(());
    };
    let state = ctx.store.state();

    output::header("Current Authentication:");
    output::field("User", &user.user_id);
    output::field("Name", &user.display_name);
    if let Some(tenant) = state.tenant_id.as_ref().or(user.tenant_id.as_ref()) {
        output::field("Tenant", tenant);
    }
    if let Some(tenant_name) = &user.tenant_name {
        output::field("Tenant name", tenant_name);
    }
    if let Some(object_id) = &user.object_id {
        output::field("Object ID", object_id);
    }
    if !user.roles.is_empty() {
        output::field("Roles", &user.roles.join(", "));
    }
    if let Some(provider) = state.provider {
        output::field("Provider", &provider.to_string());
    }

    match state.expires_on.map(|at| remaining(at, Utc::now())) {
        Some(Some((hours, minutes))) => println!(
            "  Token expires in: {}",
            format!("{}h {}m", hours, minutes).green()
        ),
        Some(None) => println!("  Token status: {}", "Expired".red()),
        None => {}
    }

    output::status_field("Status", "Authenticated", true);
    Ok(())
}

/// Whole hours and minutes until `expires_on`, or `None` once it has passed.
fn remaining(expires_on: DateTime<Utc>, now: DateTime<Utc>) -> Option<(i64, i64)> {
    let secs = (expires_on - now).num_seconds();
    if secs <= 0 {
        return None;
    }
    Some((secs / 3600, (secs % 3600) / 60))
}
