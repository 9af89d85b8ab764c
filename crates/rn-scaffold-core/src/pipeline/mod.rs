//! The project generation pipeline
//!
//! Stages run strictly in order and each one gates the next:
//!
//! 1. fetch: clone the template and drop its `.git`
//! 2. rename: run the rename utility inside the project
//! 3. install: package manager install, then selected libraries
//! 4. pods (conditional): `pod install` in `ios/`
//! 5. repository: `git init`, `git add .`, `git commit`
//!
//! No stage is retried and nothing is rolled back on failure.

pub mod fetch;
pub mod install;
pub mod rename;
pub mod repo;

use crate::config::PipelineConfig;
use crate::error::ScaffoldResult;
use crate::request::GenerationRequest;
use crate::runtime::CommandRunner;
use colored::Colorize;
use std::fmt;
use url::Url;

pub use repo::RepoContext;

/// One sequential unit of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Rename,
    Install,
    Pods,
    Repository,
}

impl Stage {
    pub fn description(&self) -> &'static str {
        match self {
            Stage::Fetch => "Cloning template repository...",
            Stage::Rename => "Renaming project...",
            Stage::Install => "Installing dependencies...",
            Stage::Pods => "Installing CocoaPods...",
            Stage::Repository => "Initializing new git repository...",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub stages: Vec<Stage>,
    pub template_files: usize,
    pub pods_installed: bool,
}

pub struct Pipeline<'a, R: CommandRunner> {
    config: &'a PipelineConfig,
    runner: &'a R,
    template_url: Url,
}

impl<'a, R: CommandRunner> Pipeline<'a, R> {
    /// Build a pipeline, resolving the template location from config and environment
    pub fn new(config: &'a PipelineConfig, runner: &'a R) -> ScaffoldResult<Self> {
        let template_url = config.resolve_template_url()?;
        Ok(Self::with_template_url(config, runner, template_url))
    }

    pub fn with_template_url(config: &'a PipelineConfig, runner: &'a R, template_url: Url) -> Self {
        Self {
            config,
            runner,
            template_url,
        }
    }

    pub fn template_url(&self) -> &Url {
        &self.template_url
    }

    pub async fn run(&self, request: &GenerationRequest) -> ScaffoldResult<PipelineReport> {
        let repo = RepoContext::new(&request.target_path);
        let mut stages = Vec::new();

        begin(Stage::Fetch, &mut stages);
        let template_files = fetch::fetch_template(self.runner, &self.template_url, &repo).await?;

        begin(Stage::Rename, &mut stages);
        rename::rename_project(
            self.runner,
            &repo,
            &self.config.rename_tool,
            &request.project_name,
            request.application_id.as_deref(),
        )
        .await?;

        begin(Stage::Install, &mut stages);
        install::install_dependencies(
            self.runner,
            &repo,
            request.package_manager,
            &request.selected_libraries,
        )
        .await?;

        let mut pods_installed = false;
        if request.install_pods {
            begin(Stage::Pods, &mut stages);
            pods_installed = install::install_pods(self.runner, &repo).await?;
        }

        begin(Stage::Repository, &mut stages);
        repo::init_repository(self.runner, &repo, &self.config.commit_message).await?;

        println!("{}", "Project setup complete!".green().bold());

        Ok(PipelineReport {
            stages,
            template_files,
            pods_installed,
        })
    }
}

fn begin(stage: Stage, stages: &mut Vec<Stage>) {
    println!("{} {}", "==>".blue().bold(), stage);
    stages.push(stage);
}
