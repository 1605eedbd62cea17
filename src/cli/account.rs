use anyhow::Result;
use chrono::{DateTime, Local};

use crate::cli::{output, AppContext};

pub fn run(ctx: &AppContext) -> Result<()> {
    output::header("Account Information:");

    match ctx.store.user_info() {
        Some(user) => {
            output::status_field("Status", "Authenticated", true);
            output::field("User", &user.user_id);
            if let Some(tenant) = &ctx.store.state().tenant_id {
                output::field("Tenant", tenant);
            }

            let state_file = ctx.store.path();
            if let Ok(meta) = std::fs::metadata(state_file) {
                output::field("State file", &state_file.display().to_string());
                output::field("File size", &format!("{} bytes", meta.len()));
                if let Ok(modified) = meta.modified() {
                    let modified: DateTime<Local> = modified.into();
                    output::field(
                        "Last modified",
                        &modified.format("%Y-%m-%d %H:%M:%S").to_string(),
                    );
                }
            }
        }
        None => {
            output::status_field("Status", "Not authenticated", false);
            output::info("  Use 'mycli login' to authenticate");
        }
    }

    println!();
    output::header("Configuration:");
    output::field(
        "Config directory",
        &ctx.paths.config_dir.display().to_string(),
    );
    output::field(
        "Directory exists",
        &ctx.paths.config_dir.exists().to_string(),
    );
    Ok(())
}
