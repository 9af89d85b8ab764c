//! Project renaming through the external rename utility

use super::repo::RepoContext;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::runtime::{run_checked, CommandRunner, CommandSpec};

/// `npx <tool> <name> [-b <application id>]`, run inside the project
pub fn rename_command(
    repo: &RepoContext,
    rename_tool: &str,
    project_name: &str,
    application_id: Option<&str>,
) -> CommandSpec {
    let cmd = CommandSpec::new("npx", &repo.path)
        .arg(rename_tool)
        .arg(project_name);
    match application_id {
        Some(id) => cmd.args(["-b", id]),
        None => cmd,
    }
}

pub async fn rename_project<R: CommandRunner>(
    runner: &R,
    repo: &RepoContext,
    rename_tool: &str,
    project_name: &str,
    application_id: Option<&str>,
) -> ScaffoldResult<()> {
    let cmd = rename_command(repo, rename_tool, project_name, application_id);
    run_checked(runner, &cmd).await.map_err(ScaffoldError::Rename)
}
