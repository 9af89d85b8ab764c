//! Template cloning

use super::repo::RepoContext;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::runtime::{run_checked, CommandRunner, CommandSpec};
use std::path::Path;
use url::Url;
use walkdir::WalkDir;

/// Clone `template_url` into the project path and detach it from the
/// template's history. Returns the number of files received.
pub async fn fetch_template<R: CommandRunner>(
    runner: &R,
    template_url: &Url,
    repo: &RepoContext,
) -> ScaffoldResult<usize> {
    let clone_error = |reason: String| ScaffoldError::Clone {
        url: template_url.to_string(),
        path: repo.path.clone(),
        reason,
    };

    let dir_name = repo
        .dir_name()
        .ok_or_else(|| clone_error("project directory has no valid UTF-8 name".to_string()))?;
    let clone = CommandSpec::new("git", repo.parent())
        .arg("clone")
        .arg(template_url.as_str())
        .arg(dir_name);

    run_checked(runner, &clone).await.map_err(clone_error)?;

    remove_git_metadata(&repo.path).await?;

    Ok(count_files(&repo.path))
}

/// Recursively delete `<path>/.git`
pub async fn remove_git_metadata(path: &Path) -> ScaffoldResult<()> {
    let git_dir = path.join(".git");
    tokio::fs::remove_dir_all(&git_dir)
        .await
        .map_err(|source| ScaffoldError::Filesystem {
            path: git_dir,
            source,
        })
}

fn count_files(path: &Path) -> usize {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::process::fake::FakeRunner;
    use std::fs;

    fn template_url() -> Url {
        Url::parse("https://example.com/template.git").unwrap()
    }

    /// Fake `git clone` that lays down a tiny template with history
    fn cloning_runner() -> FakeRunner {
        FakeRunner::new().on("git clone", |cmd| {
            let target = cmd.cwd.join(cmd.args.last().unwrap());
            fs::create_dir_all(target.join(".git/objects")).unwrap();
            fs::write(target.join(".git/HEAD"), "ref: refs/heads/main").unwrap();
            fs::create_dir_all(target.join("ios")).unwrap();
            fs::write(target.join("package.json"), "{}").unwrap();
            fs::write(target.join("ios/Podfile"), "").unwrap();
        })
    }

    #[tokio::test]
    async fn test_clone_then_strip_history() {
        let dir = tempfile::tempdir().unwrap();
        let repo = RepoContext::new(dir.path().join("MyApp"));
        let runner = cloning_runner();

        let files = fetch_template(&runner, &template_url(), &repo).await.unwrap();

        assert_eq!(files, 2);
        assert!(!repo.path.join(".git").exists());
        assert!(repo.path.join("package.json").exists());

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].cwd, dir.path());
        assert_eq!(
            calls[0].args,
            vec![
                "clone".to_string(),
                "https://example.com/template.git".to_string(),
                "MyApp".to_string(),
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_clone_under_non_utf8_parent() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join(OsStr::from_bytes(b"work\xFF"));
        fs::create_dir(&parent).unwrap();
        let repo = RepoContext::new(parent.join("MyApp"));
        let runner = cloning_runner();

        let files = fetch_template(&runner, &template_url(), &repo).await.unwrap();

        assert_eq!(files, 2);
        assert!(repo.path.join("package.json").exists());
        assert!(!repo.path.join(".git").exists());
        let calls = runner.calls();
        assert_eq!(calls[0].cwd, parent);
        assert_eq!(calls[0].args.last().map(String::as_str), Some("MyApp"));
    }

    #[tokio::test]
    async fn test_clone_failure() {
        let dir = tempfile::tempdir().unwrap();
        let repo = RepoContext::new(dir.path().join("MyApp"));
        let runner = FakeRunner::new().fail_on("git clone", 128);

        let err = fetch_template(&runner, &template_url(), &repo)
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Clone { .. }));
    }

    #[tokio::test]
    async fn test_missing_metadata_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = RepoContext::new(dir.path().join("MyApp"));
        // Clone "succeeds" but leaves nothing behind
        let runner = FakeRunner::new();

        let err = fetch_template(&runner, &template_url(), &repo)
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Filesystem { .. }));
    }
}
