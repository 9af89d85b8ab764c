//! Pipeline configuration
//!
//! A [`PipelineConfig`] declares which prompts and stages a generator run
//! includes. Two presets ship with the CLI; either can be overridden from a
//! YAML file and the template location from the environment.

pub mod version;

use crate::error::{ScaffoldError, ScaffoldResult};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use url::Url;

pub use version::check_compatibility;

/// Default template repository cloned for every project
pub const DEFAULT_TEMPLATE_URL: &str =
    "https://github.com/chernikovichAndrey/react-native-project-template";

/// Environment variable overriding the template repository
pub const TEMPLATE_URL_ENV: &str = "RN_TEMPLATE_URL";

pub const DEFAULT_RENAME_TOOL: &str = "react-native-rename@latest";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Initial commit";
pub const COCOAPODS_DOCS_URL: &str = "https://guides.cocoapods.org/using/getting-started.html";

/// Libraries offered by the full generator
pub const FULL_LIBRARIES: &[&str] = &[
    "axios",
    "redux",
    "zustand",
    "mobx",
    "react-native-reanimated",
    "react-native-mmkv",
    "@shopify/flash-list",
];

/// Libraries offered by the lite generator
pub const LITE_LIBRARIES: &[&str] = &["axios", "redux", "zustand", "mobx"];

/// Built-in generator variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Full,
    Lite,
}

impl Variant {
    pub fn config(self) -> PipelineConfig {
        match self {
            Variant::Full => PipelineConfig::full(),
            Variant::Lite => PipelineConfig::lite(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Full => write!(f, "full"),
            Variant::Lite => write!(f, "lite"),
        }
    }
}

impl FromStr for Variant {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Variant::Full),
            "lite" => Ok(Variant::Lite),
            other => Err(ScaffoldError::config(format!(
                "Unknown variant '{}' (expected full or lite)",
                other
            ))),
        }
    }
}

/// Declarative description of one generator variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Human-readable name shown in the intro banner
    pub display_name: String,

    /// Repository cloned as the starting point
    pub template_url: String,

    /// Environment variable that overrides `template_url`
    pub template_url_env: String,

    /// Ask for an application identifier and pass it to the rename tool
    pub include_application_id: bool,

    /// Libraries the user may pick from, in display order
    pub libraries_catalog: Vec<String>,

    /// Offer and run `pod install` for the iOS project
    pub include_pods_stage: bool,

    /// Package run through `npx` to rename the project
    pub rename_tool: String,

    /// Message of the single commit in the fresh repository
    pub commit_message: String,

    /// Oldest CLI version this configuration is meant for
    pub min_cli_version: Option<String>,
}

impl PipelineConfig {
    pub fn full() -> Self {
        Self {
            display_name: "Create React Native Project".to_string(),
            template_url: DEFAULT_TEMPLATE_URL.to_string(),
            template_url_env: TEMPLATE_URL_ENV.to_string(),
            include_application_id: true,
            libraries_catalog: FULL_LIBRARIES.iter().map(|s| s.to_string()).collect(),
            include_pods_stage: true,
            rename_tool: DEFAULT_RENAME_TOOL.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            min_cli_version: None,
        }
    }

    pub fn lite() -> Self {
        Self {
            display_name: "Create React Native Project (lite)".to_string(),
            include_application_id: false,
            libraries_catalog: LITE_LIBRARIES.iter().map(|s| s.to_string()).collect(),
            ..Self::full()
        }
    }

    /// Load a YAML file and lay it over `base`; absent keys keep the base value
    pub fn load(path: &Path, base: PipelineConfig) -> ScaffoldResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScaffoldError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content, base).map_err(|e| match e {
            ScaffoldError::Config(msg) => {
                ScaffoldError::config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn from_yaml(content: &str, base: PipelineConfig) -> ScaffoldResult<Self> {
        let overrides: PipelineOverrides = serde_yaml::from_str(content)
            .map_err(|e| ScaffoldError::config(format!("Failed to parse config: {}", e)))?;
        let config = overrides.apply(base);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ScaffoldResult<()> {
        if self.rename_tool.trim().is_empty() {
            return Err(ScaffoldError::config("rename_tool cannot be empty"));
        }
        if self.commit_message.trim().is_empty() {
            return Err(ScaffoldError::config("commit_message cannot be empty"));
        }
        if let Some(lib) = self.libraries_catalog.iter().find(|l| l.trim().is_empty()) {
            return Err(ScaffoldError::config(format!(
                "libraries_catalog contains an empty entry: {:?}",
                lib
            )));
        }
        parse_template_url(&self.template_url)?;
        Ok(())
    }

    /// Resolve the template location, honouring the environment override
    pub fn resolve_template_url(&self) -> ScaffoldResult<Url> {
        self.resolve_template_url_with(std::env::var(&self.template_url_env).ok())
    }

    pub fn resolve_template_url_with(&self, env_value: Option<String>) -> ScaffoldResult<Url> {
        let raw = env_value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.template_url.clone());
        parse_template_url(&raw)
    }

    pub fn is_library_known(&self, library: &str) -> bool {
        self.libraries_catalog.iter().any(|l| l == library)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::full()
    }
}

fn parse_template_url(raw: &str) -> ScaffoldResult<Url> {
    Url::parse(raw).map_err(|e| ScaffoldError::config(format!("Invalid template URL {}: {}", raw, e)))
}

/// Partial configuration as read from a YAML file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PipelineOverrides {
    display_name: Option<String>,
    template_url: Option<String>,
    template_url_env: Option<String>,
    include_application_id: Option<bool>,
    libraries_catalog: Option<Vec<String>>,
    include_pods_stage: Option<bool>,
    rename_tool: Option<String>,
    commit_message: Option<String>,
    min_cli_version: Option<String>,
}

impl PipelineOverrides {
    fn apply(self, base: PipelineConfig) -> PipelineConfig {
        PipelineConfig {
            display_name: self.display_name.unwrap_or(base.display_name),
            template_url: self.template_url.unwrap_or(base.template_url),
            template_url_env: self.template_url_env.unwrap_or(base.template_url_env),
            include_application_id: self
                .include_application_id
                .unwrap_or(base.include_application_id),
            libraries_catalog: self.libraries_catalog.unwrap_or(base.libraries_catalog),
            include_pods_stage: self.include_pods_stage.unwrap_or(base.include_pods_stage),
            rename_tool: self.rename_tool.unwrap_or(base.rename_tool),
            commit_message: self.commit_message.unwrap_or(base.commit_message),
            min_cli_version: self.min_cli_version.or(base.min_cli_version),
        }
    }
}
