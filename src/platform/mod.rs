pub mod detection;

pub use detection::{command_exists, detect_platform, Platform};

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::MacOS { .. } => write!(f, "macos"),
            Platform::Linux { .. } => write!(f, "linux"),
            Platform::Windows { .. } => write!(f, "windows"),
            Platform::Unknown => write!(f, "unknown"),
        }
    }
}

impl Platform {
    /// Human-readable detailed description, e.g. "macOS 15.3.1 (aarch64)".
    pub fn display_detailed(&self) -> String {
        match self {
            Platform::MacOS { version, arch } => {
                let ver = version.as_deref().unwrap_or("unknown");
                format!("macOS {} ({})", ver, arch)
            }
            Platform::Linux {
                distro,
                version,
                arch,
            } => match version {
                Some(ver) => format!("Linux {} {} ({})", distro, ver, arch),
                None => format!("Linux {} ({})", distro, arch),
            },
            Platform::Windows { arch } => format!("Windows ({})", arch),
            Platform::Unknown => "Unknown".to_string(),
        }
    }
}
