//! External process execution and tool detection
//!
//! This module provides:
//! - A [`CommandRunner`] abstraction with a real, stdio-inheriting implementation
//! - Detection of git, npx, npm/yarn and CocoaPods before a run

pub mod process;
pub mod tool;

pub use process::{run_checked, CommandOutcome, CommandRunner, CommandSpec, SystemRunner};
pub use tool::{check_tools, Preflight, ToolConfig, ToolInfo};
