//! The generation request and the validation rules for each answer

use crate::config::PipelineConfig;
use crate::error::{ScaffoldError, ScaffoldResult};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Package manager used for the install stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    pub const ALL: [PackageManager; 2] = [PackageManager::Npm, PackageManager::Yarn];

    pub fn executable(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
        }
    }

    /// Arguments that install the template's own dependencies
    pub fn install_args(&self) -> Vec<String> {
        match self {
            PackageManager::Npm => vec!["install".to_string()],
            // Bare `yarn` installs
            PackageManager::Yarn => Vec::new(),
        }
    }

    /// Arguments that add the given libraries to the project
    pub fn add_args<'a, I>(&self, libraries: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let verb = match self {
            PackageManager::Npm => "install",
            PackageManager::Yarn => "add",
        };
        std::iter::once(verb.to_string())
            .chain(libraries.into_iter().cloned())
            .collect()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.executable())
    }
}

impl FromStr for PackageManager {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            other => Err(ScaffoldError::validation(format!(
                "Unknown package manager '{}' (expected npm or yarn)",
                other
            ))),
        }
    }
}

/// Raw answers gathered by the prompt layer or supplied on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub project_name: String,
    pub application_id: Option<String>,
    pub libraries: Vec<String>,
    pub package_manager: PackageManager,
    pub install_pods: bool,
}

/// Validated input for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub project_name: String,
    pub application_id: Option<String>,
    pub selected_libraries: BTreeSet<String>,
    pub package_manager: PackageManager,
    pub install_pods: bool,
    /// `<cwd>/<project_name>`, computed once
    pub target_path: PathBuf,
}

impl GenerationRequest {
    /// Validate `answers` against `config` and derive the target path.
    ///
    /// Nothing destructive may run before this succeeds. The application id is
    /// required exactly when the configuration asks for one and dropped
    /// otherwise; the pods flag is forced off when the stage is not configured.
    pub fn new(config: &PipelineConfig, answers: Answers, cwd: &Path) -> ScaffoldResult<Self> {
        validate_project_name(&answers.project_name)?;

        let application_id = if config.include_application_id {
            let id = answers
                .application_id
                .ok_or_else(|| ScaffoldError::validation("Application ID is required"))?;
            validate_application_id(&id)?;
            Some(id)
        } else {
            None
        };

        validate_libraries(config, &answers.libraries)?;

        let project_name = answers.project_name;
        let target_path = cwd.join(&project_name);

        Ok(Self {
            project_name,
            application_id,
            selected_libraries: answers.libraries.into_iter().collect(),
            package_manager: answers.package_manager,
            install_pods: config.include_pods_stage && answers.install_pods,
            target_path,
        })
    }
}

pub fn validate_project_name(name: &str) -> ScaffoldResult<()> {
    if name.trim().is_empty() {
        return Err(ScaffoldError::validation("Project name cannot be empty"));
    }
    Ok(())
}

pub fn validate_application_id(id: &str) -> ScaffoldResult<()> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
    if !valid {
        return Err(ScaffoldError::validation(
            "Application ID can only contain letters, numbers, dots, and underscores, and cannot be empty",
        ));
    }
    Ok(())
}

pub fn validate_libraries(config: &PipelineConfig, libraries: &[String]) -> ScaffoldResult<()> {
    let unknown: Vec<&str> = libraries
        .iter()
        .filter(|l| !config.is_library_known(l))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(ScaffoldError::validation(format!(
            "Unknown libraries: {} (available: {})",
            unknown.join(", "),
            config.libraries_catalog.join(", ")
        )));
    }
    Ok(())
}
