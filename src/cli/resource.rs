use anyhow::{bail, Result};
use clap::{Args as ClapArgs, Subcommand, ValueEnum};
use colored::Colorize;

use crate::cli::output;

#[derive(ClapArgs)]
pub struct Args {
    #[command(subcommand)]
    pub command: ResourceCommand,
}

#[derive(Subcommand)]
pub enum ResourceCommand {
    /// Create a new resource
    Create {
        /// Name of the resource
        #[arg(long, short)]
        name: String,

        /// Location for the resource
        #[arg(long, short, default_value = "eastus")]
        location: String,

        /// Type of resource to create
        #[arg(long = "type", short = 't', value_enum, ignore_case = true, default_value_t = ResourceType::Vm)]
        kind: ResourceType,
    },

    /// List all resources
    List {
        /// Filter by location
        #[arg(long, short)]
        location: Option<String>,

        /// Filter by resource type
        #[arg(long = "type", short = 't')]
        kind: Option<String>,
    },

    /// Delete a resource
    Delete {
        /// Name of the resource
        name: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResourceType {
    Vm,
    Storage,
    Database,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Vm => write!(f, "vm"),
            ResourceType::Storage => write!(f, "storage"),
            ResourceType::Database => write!(f, "database"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Resource {
    name: &'static str,
    kind: &'static str,
    location: &'static str,
    status: &'static str,
}

static RESOURCES: [Resource; 3] = [
    Resource {
        name: "myvm-001",
        kind: "vm",
        location: "eastus",
        status: "running",
    },
    Resource {
        name: "mystorage-001",
        kind: "storage",
        location: "westus",
        status: "active",
    },
    Resource {
        name: "mydb-001",
        kind: "database",
        location: "eastus",
        status: "running",
    },
];

pub fn run(args: Args) -> Result<()> {
    match args.command {
        ResourceCommand::Create {
            name,
            location,
            kind,
        } => {
            create(&name, &location, kind);
            Ok(())
        }
        ResourceCommand::List { location, kind } => {
            list(location.as_deref(), kind.as_deref());
            Ok(())
        }
        ResourceCommand::Delete { name, yes } => delete(&name, yes),
    }
}

fn create(name: &str, location: &str, kind: ResourceType) {
    println!("{} Creating {} resource...", "✓".green(), kind);
    output::field("Name", name);
    output::field("Location", location);
    output::field("Type", &kind.to_string());
    println!(
        "{} Resource '{}' created successfully!",
        "✓".green(),
        name
    );
}

fn filter_resources(location: Option<&str>, kind: Option<&str>) -> Vec<&'static Resource> {
    RESOURCES
        .iter()
        .filter(|r| location.map_or(true, |l| r.location == l))
        .filter(|r| kind.map_or(true, |k| r.kind == k))
        .collect()
}

fn list(location: Option<&str>, kind: Option<&str>) {
    println!("{} Listing resources...", "📋".yellow());

    let resources = filter_resources(location, kind);
    if resources.is_empty() {
        output::warning("No resources found matching the criteria.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "{:<15} {:<10} {:<10} {:<10}",
            "Name", "Type", "Location", "Status"
        )
        .blue()
    );
    println!("{}", "-".repeat(50));

    for r in resources {
        let status = format!("{:<10}", r.status);
        let status = if r.status == "running" || r.status == "active" {
            status.green()
        } else {
            status.red()
        };
        println!("{:<15} {:<10} {:<10} {}", r.name, r.kind, r.location, status);
    }
}

fn delete(name: &str, yes: bool) -> Result<()> {
    if !yes && !output::confirm("Are you sure you want to delete this resource?")? {
        bail!("Aborted!");
    }
    println!("{}  Deleting resource '{}'...", "🗑️".red(), name);
    println!(
        "{} Resource '{}' deleted successfully!",
        "✓".green(),
        name
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(resources: &[&Resource]) -> Vec<&'static str> {
        resources.iter().map(|r| r.name).collect()
    }

    #[test]
    fn no_filters_returns_everything() {
        assert_eq!(
            names(&filter_resources(None, None)),
            vec!["myvm-001", "mystorage-001", "mydb-001"]
        );
    }

    #[test]
    fn filters_by_location() {
        assert_eq!(
            names(&filter_resources(Some("eastus"), None)),
            vec!["myvm-001", "mydb-001"]
        );
    }

    #[test]
    fn filters_combine() {
        assert_eq!(
            names(&filter_resources(Some("eastus"), Some("database"))),
            vec!["mydb-001"]
        );
        assert!(filter_resources(Some("westus"), Some("vm")).is_empty());
    }

    #[test]
    fn filters_are_exact_match() {
        assert!(filter_resources(Some("EastUS"), None).is_empty());
    }

    #[test]
    fn resource_type_display_matches_cli_value() {
        for kind in [ResourceType::Vm, ResourceType::Storage, ResourceType::Database] {
            let value = kind.to_possible_value().expect("not skipped");
            assert_eq!(value.get_name(), kind.to_string());
        }
    }
}
