//! RN Scaffold Core - shared library for the React Native project generator
//!
//! Generating a project is a fixed sequence of external tool invocations: clone
//! a template repository, rename it, install packages, optionally install
//! CocoaPods, and commit the result to a fresh git repository.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Configuration, request validation, process
//!   running and tool detection
//! - **Layer 2: Workflow Orchestration** - [`Pipeline`] running each stage over a
//!   [`CommandRunner`], so the sequence can be driven by a fake in tests
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use rn_scaffold_core::{Answers, GenerationRequest, Pipeline, PipelineConfig, SystemRunner};
//!
//! let config = PipelineConfig::full();
//! let request = GenerationRequest::new(&config, answers, &std::env::current_dir()?)?;
//! Pipeline::new(&config, &SystemRunner)?.run(&request).await?;
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod request;
pub mod runtime;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{PipelineConfig, Variant};
pub use error::{ScaffoldError, ScaffoldResult};
pub use pipeline::{Pipeline, PipelineReport, RepoContext, Stage};
pub use request::{Answers, GenerationRequest, PackageManager};
pub use runtime::{CommandOutcome, CommandRunner, CommandSpec, SystemRunner};

#[cfg(feature = "tui")]
pub use tui::run;
