//! Subprocess execution behind a swappable runner

use colored::Colorize;
use std::fmt;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use tokio::process::Command as TokioCommand;

/// A single external command and the directory it runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// How a finished command exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub success: bool,
}

impl CommandOutcome {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            success: true,
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            code: Some(code),
            success: false,
        }
    }
}

/// Executes commands to completion, one at a time
pub trait CommandRunner {
    fn run(&self, command: &CommandSpec) -> impl Future<Output = io::Result<CommandOutcome>>;
}

/// Run `command` and turn a spawn error or non-zero exit into a readable reason
pub async fn run_checked<R: CommandRunner>(runner: &R, command: &CommandSpec) -> Result<(), String> {
    match runner.run(command).await {
        Ok(outcome) if outcome.success => Ok(()),
        Ok(outcome) => Err(match outcome.code {
            Some(code) => format!("`{}` exited with code {}", command, code),
            None => format!("`{}` was terminated by a signal", command),
        }),
        Err(e) => Err(format!("could not start `{}`: {}", command.program, e)),
    }
}

/// Runs real processes with inherited stdio so tool output stays live
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> io::Result<CommandOutcome> {
        println!("{} {}", "Running:".dimmed(), command.to_string().yellow());

        let status = TokioCommand::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .status()
            .await?;

        Ok(CommandOutcome {
            code: status.code(),
            success: status.success(),
        })
    }
}
