//! Package and CocoaPods installation

use super::repo::RepoContext;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::request::PackageManager;
use crate::runtime::{run_checked, CommandRunner, CommandSpec};
use colored::Colorize;
use std::collections::BTreeSet;

/// Install the template's dependencies, then add any selected libraries
pub async fn install_dependencies<R: CommandRunner>(
    runner: &R,
    repo: &RepoContext,
    package_manager: PackageManager,
    libraries: &BTreeSet<String>,
) -> ScaffoldResult<()> {
    let install = CommandSpec::new(package_manager.executable(), &repo.path)
        .args(package_manager.install_args());
    run_checked(runner, &install)
        .await
        .map_err(ScaffoldError::Install)?;

    if libraries.is_empty() {
        return Ok(());
    }

    println!(
        "{} {}",
        "Installing selected libraries:".cyan(),
        libraries.iter().cloned().collect::<Vec<_>>().join(" ")
    );
    let add = CommandSpec::new(package_manager.executable(), &repo.path)
        .args(package_manager.add_args(libraries));
    run_checked(runner, &add).await.map_err(ScaffoldError::Install)
}

/// Run `pod install` in `<project>/ios`.
///
/// Returns `false` without running anything when the project has no `ios`
/// directory.
pub async fn install_pods<R: CommandRunner>(runner: &R, repo: &RepoContext) -> ScaffoldResult<bool> {
    let ios_dir = repo.path.join("ios");
    if !ios_dir.is_dir() {
        println!(
            "{} {} not found, skipping CocoaPods",
            "Warning:".yellow(),
            ios_dir.display()
        );
        return Ok(false);
    }

    let pod = CommandSpec::new("pod", &ios_dir).arg("install");
    run_checked(runner, &pod)
        .await
        .map_err(ScaffoldError::NativeInstall)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::process::fake::FakeRunner;

    fn libs(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_npm_install_then_add() {
        let runner = FakeRunner::new();
        let repo = RepoContext::new("/work/MyApp");

        install_dependencies(&runner, &repo, PackageManager::Npm, &libs(&["zustand", "axios"]))
            .await
            .unwrap();

        assert_eq!(
            runner.command_lines(),
            vec!["npm install", "npm install axios zustand"]
        );
    }

    #[tokio::test]
    async fn test_yarn_never_uses_npm() {
        let runner = FakeRunner::new();
        let repo = RepoContext::new("/work/MyApp");

        install_dependencies(&runner, &repo, PackageManager::Yarn, &libs(&["mobx"]))
            .await
            .unwrap();

        assert_eq!(runner.command_lines(), vec!["yarn", "yarn add mobx"]);
        assert!(runner.calls().iter().all(|c| c.program == "yarn"));
    }

    #[tokio::test]
    async fn test_no_libraries_skips_add() {
        let runner = FakeRunner::new();
        let repo = RepoContext::new("/work/MyApp");

        install_dependencies(&runner, &repo, PackageManager::Npm, &BTreeSet::new())
            .await
            .unwrap();

        assert_eq!(runner.command_lines(), vec!["npm install"]);
    }

    #[tokio::test]
    async fn test_install_failure_stops_before_add() {
        let runner = FakeRunner::new().fail_on("npm install", 1);
        let repo = RepoContext::new("/work/MyApp");

        let err = install_dependencies(&runner, &repo, PackageManager::Npm, &libs(&["axios"]))
            .await
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Install(_)));
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_pods_run_inside_ios() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("ios")).unwrap();
        let runner = FakeRunner::new();
        let repo = RepoContext::new(dir.path());

        assert!(install_pods(&runner, &repo).await.unwrap());
        let calls = runner.calls();
        assert_eq!(calls[0].to_string(), "pod install");
        assert_eq!(calls[0].cwd, dir.path().join("ios"));
    }

    #[tokio::test]
    async fn test_pods_skipped_without_ios_dir() {
        let dir = tempfile::tempdir().unwrap();
        let runner = FakeRunner::new();
        let repo = RepoContext::new(dir.path());

        assert!(!install_pods(&runner, &repo).await.unwrap());
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pod_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("ios")).unwrap();
        let runner = FakeRunner::new().fail_on("pod", 1);
        let repo = RepoContext::new(dir.path());

        let err = install_pods(&runner, &repo).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::NativeInstall(_)));
    }
}
