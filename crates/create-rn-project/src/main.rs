//! create-rn-project - React Native project generator

use anyhow::Result;
use clap::Parser;
use rn_scaffold_core::tui::CreateArgs;
use rn_scaffold_core::{PackageManager, PipelineConfig, ScaffoldError, Variant};
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

const UPGRADE_COMMAND: &str = "cargo install create-rn-project --force";

#[derive(Parser, Debug)]
#[command(name = "create-rn-project")]
#[command(about = "Generate a React Native project from a template repository")]
#[command(version)]
pub struct Args {
    /// Generator variant: full (asks for an application ID) or lite
    #[arg(long, default_value = "full", value_parser = parse_variant)]
    pub variant: Variant,

    /// YAML file overriding the variant's pipeline configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Application ID (e.g., com.example.app)
    #[arg(short = 'b', long = "app-id")]
    pub application_id: Option<String>,

    /// Libraries to install (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub libraries: Option<Vec<String>>,

    /// Package manager to use (npm or yarn)
    #[arg(short, long, value_parser = parse_package_manager)]
    pub package_manager: Option<PackageManager>,

    /// Install CocoaPods for iOS
    #[arg(long, conflicts_with = "no_pods")]
    pub pods: bool,

    /// Do not install CocoaPods
    #[arg(long = "no-pods")]
    pub no_pods: bool,

    /// Skip the git/npx/package manager/CocoaPods availability check
    #[arg(long = "skip-checks")]
    pub skip_checks: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<&Args> for CreateArgs {
    fn from(args: &Args) -> Self {
        let install_pods = match (args.pods, args.no_pods) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        CreateArgs {
            name: args.name.clone(),
            application_id: args.application_id.clone(),
            libraries: args.libraries.clone(),
            package_manager: args.package_manager,
            install_pods,
            skip_checks: args.skip_checks,
            yes: args.yes,
        }
    }
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    s.parse().map_err(|e: ScaffoldError| e.to_string())
}

fn parse_package_manager(s: &str) -> Result<PackageManager, String> {
    s.parse().map_err(|e: ScaffoldError| e.to_string())
}

fn load_config(args: &Args) -> Result<PipelineConfig> {
    let base = args.variant.config();
    let config = match &args.config {
        Some(path) => PipelineConfig::load(path, base)?,
        None => base,
    };
    Ok(config)
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    rn_scaffold_core::run(&config, CreateArgs::from(&args), CLI_VERSION, UPGRADE_COMMAND).await
}

/// Exit status for a failed run and whether it must terminate at once.
///
/// A rename failure is fatal: the process exits right after the error is
/// printed instead of returning through `main`.
fn failure_exit(err: &anyhow::Error) -> (u8, bool) {
    let fatal = err
        .downcast_ref::<ScaffoldError>()
        .is_some_and(ScaffoldError::is_fatal);
    (1, fatal)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = run(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (code, fatal) = failure_exit(&err);
            eprintln!("Error: {:#}", err);
            if fatal {
                std::process::exit(code.into());
            }
            ExitCode::from(code)
        }
    }
}
