//! Fresh repository creation for the generated project

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::runtime::{run_checked, CommandRunner, CommandSpec};
use std::path::{Path, PathBuf};

/// Location every git command of a run operates on.
///
/// The clone runs in the parent and names only the final component, so the
/// parent path never has to be representable as a command argument.
/// init/add/commit run inside `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    pub path: PathBuf,
}

impl RepoContext {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Directory the clone is started from
    pub fn parent(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    /// Final path component, as passed to `git clone`
    pub fn dir_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    pub fn git(&self) -> CommandSpec {
        CommandSpec::new("git", &self.path)
    }
}

/// `git init`, `git add .`, `git commit -m <message>` inside the project
pub async fn init_repository<R: CommandRunner>(
    runner: &R,
    repo: &RepoContext,
    message: &str,
) -> ScaffoldResult<()> {
    let steps = [
        repo.git().arg("init"),
        repo.git().args(["add", "."]),
        repo.git().args(["commit", "-m", message]),
    ];

    for step in &steps {
        run_checked(runner, step).await.map_err(ScaffoldError::Git)?;
    }
    Ok(())
}
