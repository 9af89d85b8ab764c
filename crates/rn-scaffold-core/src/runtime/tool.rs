//! Detection of the external tools the pipeline shells out to

use crate::request::PackageManager;
use anyhow::Result;
use colored::Colorize;
use std::process::Command;

/// An external executable the pipeline depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Name of the binary on PATH
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Where to find installation instructions
    pub docs_url: &'static str,
}

/// Detection result for one tool
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

pub const GIT: ToolConfig = ToolConfig {
    name: "git",
    display_name: "Git",
    docs_url: "https://git-scm.com/downloads",
};

pub const NPX: ToolConfig = ToolConfig {
    name: "npx",
    display_name: "npx",
    docs_url: "https://nodejs.org",
};

pub const NPM: ToolConfig = ToolConfig {
    name: "npm",
    display_name: "npm",
    docs_url: "https://nodejs.org",
};

pub const YARN: ToolConfig = ToolConfig {
    name: "yarn",
    display_name: "Yarn",
    docs_url: "https://yarnpkg.com/getting-started/install",
};

pub const COCOAPODS: ToolConfig = ToolConfig {
    name: "pod",
    display_name: "CocoaPods",
    docs_url: crate::config::COCOAPODS_DOCS_URL,
};

impl ToolConfig {
    pub fn for_package_manager(pm: PackageManager) -> ToolConfig {
        match pm {
            PackageManager::Npm => NPM,
            PackageManager::Yarn => YARN,
        }
    }

    /// Install hint shown when the tool is missing
    pub fn hint(&self) -> String {
        format!("{} (install from {})", self.display_name, self.docs_url)
    }
}

/// Detect a tool by asking it for its version
pub fn detect(tool: &ToolConfig) -> ToolInfo {
    let output = Command::new(tool.name).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout)
                .lines()
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
            ToolInfo {
                name: tool.display_name,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo {
            name: tool.display_name,
            version: None,
            available: false,
        },
    }
}

/// Outcome of checking every tool a run will need
#[derive(Debug, Clone)]
pub struct Preflight {
    pub found: Vec<ToolInfo>,
    /// Install hints for missing tools without which the run cannot succeed
    pub missing: Vec<String>,
    /// CocoaPods was needed but is not installed
    pub pods_missing: bool,
}

impl Preflight {
    /// Fail with the list of missing required tools, if any
    pub fn ensure_required(&self) -> Result<()> {
        if !self.missing.is_empty() {
            anyhow::bail!(
                "Missing required tools:\n{}",
                self.missing
                    .iter()
                    .map(|m| format!("  - {}", m))
                    .collect::<Vec<_>>()
                    .join("\n")
            );
        }
        Ok(())
    }

    pub fn summary(&self) -> String {
        self.found
            .iter()
            .map(|t| format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown")))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Check the tools needed for a run with the given choices
pub fn check_tools(package_manager: PackageManager, install_pods: bool) -> Preflight {
    check_tools_with(package_manager, install_pods, detect)
}

pub fn check_tools_with<F>(package_manager: PackageManager, install_pods: bool, detect_tool: F) -> Preflight
where
    F: Fn(&ToolConfig) -> ToolInfo,
{
    let mut found = Vec::new();
    let mut missing = Vec::new();

    for tool in [GIT, NPX, ToolConfig::for_package_manager(package_manager)] {
        let info = detect_tool(&tool);
        if info.available {
            found.push(info);
        } else {
            missing.push(tool.hint());
        }
    }

    let mut pods_missing = false;
    if install_pods {
        let info = detect_tool(&COCOAPODS);
        if info.available {
            found.push(info);
        } else {
            pods_missing = true;
        }
    }

    Preflight {
        found,
        missing,
        pods_missing,
    }
}

/// Open a tool's documentation in the default browser
pub fn open_docs(tool: &ToolConfig) -> Result<()> {
    println!(
        "{}",
        format!("Opening {} documentation in your browser...", tool.display_name).cyan()
    );
    open::that(tool.docs_url)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect_all_but(missing: &'static [&'static str]) -> impl Fn(&ToolConfig) -> ToolInfo {
        move |tool| ToolInfo {
            name: tool.display_name,
            version: Some("1.0.0".to_string()),
            available: !missing.contains(&tool.name),
        }
    }

    #[test]
    fn test_all_tools_present() {
        let preflight = check_tools_with(PackageManager::Npm, true, detect_all_but(&[]));
        assert!(preflight.missing.is_empty() && !preflight.pods_missing);
        let names: Vec<_> = preflight.found.iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Git", "npx", "npm", "CocoaPods"]);
    }

    #[test]
    fn test_checks_chosen_package_manager_only() {
        let preflight = check_tools_with(PackageManager::Yarn, false, detect_all_but(&["npm"]));
        assert!(preflight.missing.is_empty() && !preflight.pods_missing);
        assert!(preflight.found.iter().any(|t| t.name == "Yarn"));
    }

    #[test]
    fn test_missing_git_is_required() {
        let preflight = check_tools_with(PackageManager::Npm, false, detect_all_but(&["git"]));
        let err = preflight.ensure_required().unwrap_err();
        assert!(err.to_string().contains("Git"));
    }

    #[test]
    fn test_missing_pods_is_not_required() {
        let preflight = check_tools_with(PackageManager::Npm, true, detect_all_but(&["pod"]));
        assert!(preflight.pods_missing);
        assert!(preflight.ensure_required().is_ok());

        let preflight = check_tools_with(PackageManager::Npm, false, detect_all_but(&["pod"]));
        assert!(!preflight.pods_missing);
    }

    #[test]
    fn test_detect_missing_binary() {
        let tool = ToolConfig {
            name: "definitely-not-a-real-binary-rn-scaffold",
            display_name: "Nothing",
            docs_url: "https://example.com",
        };
        assert!(!detect(&tool).available);
    }
}
