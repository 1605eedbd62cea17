use std::fmt;

/// CPU architecture detected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    X86_64,
    Aarch64,
    Unknown,
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Architecture::X86_64 => write!(f, "x86_64"),
            Architecture::Aarch64 => write!(f, "aarch64"),
            Architecture::Unknown => write!(f, "unknown"),
        }
    }
}

/// Operating system family plus whatever version detail is cheap to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    MacOS {
        version: Option<String>,
        arch: Architecture,
    },
    Linux {
        distro: String,
        version: Option<String>,
        arch: Architecture,
    },
    Windows {
        arch: Architecture,
    },
    Unknown,
}

/// Detect the current platform.
pub fn detect_platform() -> Platform {
    let arch = detect_architecture();
    if cfg!(target_os = "macos") {
        Platform::MacOS {
            version: detect_macos_version(),
            arch,
        }
    } else if cfg!(target_os = "linux") {
        let os_release = std::fs::read_to_string("/etc/os-release").unwrap_or_default();
        Platform::Linux {
            distro: os_release_field(&os_release, "ID").unwrap_or_else(|| "unknown".into()),
            version: os_release_field(&os_release, "VERSION_ID"),
            arch,
        }
    } else if cfg!(target_os = "windows") {
        Platform::Windows { arch }
    } else {
        Platform::Unknown
    }
}

/// Check whether a command is available on `$PATH`.
///
/// Uses the `which` crate for PATH resolution; no shell is spawned.
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Detect CPU architecture from `std::env::consts::ARCH`.
pub fn detect_architecture() -> Architecture {
    match std::env::consts::ARCH {
        "x86_64" => Architecture::X86_64,
        "aarch64" => Architecture::Aarch64,
        _ => Architecture::Unknown,
    }
}

/// Read a `KEY=value` field from `/etc/os-release` content, unquoted.
fn os_release_field(content: &str, key: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.strip_prefix(key)?.strip_prefix('=')?;
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Run `sw_vers -productVersion` to obtain the macOS version string.
fn detect_macos_version() -> Option<String> {
    let output = std::process::Command::new("sw_vers")
        .arg("-productVersion")
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }
    let ver = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!ver.is_empty()).then_some(ver)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UBUNTU: &str = r#"NAME="Ubuntu"
VERSION_ID="22.04"
ID=ubuntu
ID_LIKE=debian
"#;

    #[test]
    fn os_release_reads_quoted_and_bare_values() {
        assert_eq!(os_release_field(UBUNTU, "ID").as_deref(), Some("ubuntu"));
        assert_eq!(os_release_field(UBUNTU, "VERSION_ID").as_deref(), Some("22.04"));
    }

    #[test]
    fn os_release_does_not_confuse_prefixed_keys() {
        // ID must not match ID_LIKE
        let content = "ID_LIKE=debian\nID=pop\n";
        assert_eq!(os_release_field(content, "ID").as_deref(), Some("pop"));
    }

    #[test]
    fn os_release_missing_or_empty_field() {
        assert!(os_release_field(UBUNTU, "BUILD_ID").is_none());
        assert!(os_release_field("VERSION_ID=\"\"\n", "VERSION_ID").is_none());
        assert!(os_release_field("", "ID").is_none());
    }

    #[test]
    fn command_exists_negative() {
        assert!(!command_exists("nonexistent_command_xyz_12345"));
        assert!(!command_exists(""));
    }

    #[test]
    fn architecture_display_is_lowercase() {
        assert_eq!(Architecture::X86_64.to_string(), "x86_64");
        assert_eq!(Architecture::Aarch64.to_string(), "aarch64");
    }

    #[test]
    fn detect_platform_not_unknown() {
        assert_ne!(detect_platform(), Platform::Unknown);
    }
}
