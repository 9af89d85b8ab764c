//! Version comparison between the CLI and a pipeline configuration

use semver::Version;

/// Compare the running CLI against the version a configuration asks for.
/// Returns a warning message if the CLI is older than required.
pub fn check_compatibility(
    cli_version: &str,
    required_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version)?;
    let required_ver = parse_version(required_version)?;

    if cli_ver < required_ver {
        Some(format!(
            "This configuration was written for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            required_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse a version string, tolerating a leading 'v'
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}
