//! Charm-style CLI prompts using cliclack

use crate::config::{check_compatibility, PipelineConfig};
use crate::error::ScaffoldError;
use crate::pipeline::{Pipeline, PipelineReport};
use crate::request::{
    validate_application_id, validate_libraries, validate_project_name, Answers,
    GenerationRequest, PackageManager,
};
use crate::runtime::tool::{self, COCOAPODS};
use crate::runtime::SystemRunner;
use anyhow::Result;
use std::path::PathBuf;

/// Answers and switches that can be supplied up front
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name (directory and display name)
    pub name: Option<String>,

    /// Application identifier, e.g. com.example.app
    pub application_id: Option<String>,

    /// Libraries to add on top of the template
    pub libraries: Option<Vec<String>>,

    /// Package manager to install with
    pub package_manager: Option<PackageManager>,

    /// Whether to run `pod install`
    pub install_pods: Option<bool>,

    /// Skip the tool availability check
    pub skip_checks: bool,

    /// Accept defaults for every unanswered question (non-interactive mode)
    pub yes: bool,
}

/// Run the generator with interactive prompts
pub async fn run(
    config: &PipelineConfig,
    args: CreateArgs,
    cli_version: &str,
    upgrade_command: &str,
) -> Result<()> {
    cliclack::intro(&config.display_name)?;

    if let Some(required) = &config.min_cli_version {
        if let Some(warning) = check_compatibility(cli_version, required, upgrade_command) {
            cliclack::log::warning(format!(
                "Version warning: {}",
                warning.lines().next().unwrap_or(&warning)
            ))?;
        }
    }

    // Step 1: Gather answers
    let answers = if args.yes {
        non_interactive_answers(config, &args)?
    } else {
        prompt_answers(config, &args)?
    };

    // Step 2: Validate before anything touches the disk
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut request = GenerationRequest::new(config, answers, &cwd)?;

    // Step 3: Check tools
    let pods_deferred = if args.skip_checks {
        cliclack::log::info("Skipping tool check")?;
        false
    } else {
        check_tools(&mut request, &args)?
    };

    // Step 4: Run the pipeline
    let pipeline = Pipeline::new(config, &SystemRunner)?;
    cliclack::log::info(format!(
        "Creating {} from {}",
        request.target_path.display(),
        pipeline.template_url()
    ))?;
    let report = pipeline.run(&request).await?;

    cliclack::log::success(format!(
        "Created {} with {} template files",
        request.project_name, report.template_files
    ))?;

    // Step 5: Show next steps
    print_next_steps(&request, &report, pods_deferred)?;

    Ok(())
}

/// Resolve every answer from `args` and defaults without prompting
pub fn non_interactive_answers(
    config: &PipelineConfig,
    args: &CreateArgs,
) -> Result<Answers, ScaffoldError> {
    let project_name = args.name.clone().ok_or_else(|| {
        ScaffoldError::validation("Project name is required in non-interactive mode")
    })?;
    validate_project_name(&project_name)?;

    let application_id = if config.include_application_id {
        let id = args.application_id.clone().ok_or_else(|| {
            ScaffoldError::validation("Application ID is required in non-interactive mode")
        })?;
        validate_application_id(&id)?;
        Some(id)
    } else {
        None
    };

    let libraries = args.libraries.clone().unwrap_or_default();
    validate_libraries(config, &libraries)?;

    Ok(Answers {
        project_name,
        application_id,
        libraries,
        package_manager: args.package_manager.unwrap_or_default(),
        install_pods: config.include_pods_stage && args.install_pods.unwrap_or(true),
    })
}

fn prompt_answers(config: &PipelineConfig, args: &CreateArgs) -> Result<Answers> {
    let project_name = match &args.name {
        Some(name) => {
            validate_project_name(name)?;
            cliclack::log::info(format!("Project name: {}", name))?;
            name.clone()
        }
        None => cliclack::input("Enter the project name:")
            .validate(|input: &String| validate_project_name(input).map_err(|e| e.to_string()))
            .interact()
            .map_err(ScaffoldError::Prompt)?,
    };

    let application_id = if config.include_application_id {
        let id = match &args.application_id {
            Some(id) => {
                validate_application_id(id)?;
                id.clone()
            }
            None => cliclack::input("Enter the application ID (e.g., com.example.app):")
                .validate(|input: &String| {
                    validate_application_id(input).map_err(|e| e.to_string())
                })
                .interact()
                .map_err(ScaffoldError::Prompt)?,
        };
        Some(id)
    } else {
        if args.application_id.is_some() {
            cliclack::log::warning("This generator does not set an application ID; ignoring it")?;
        }
        None
    };

    let libraries = match &args.libraries {
        Some(libs) => {
            validate_libraries(config, libs)?;
            libs.clone()
        }
        None if config.libraries_catalog.is_empty() => Vec::new(),
        None => {
            let mut multi = cliclack::multiselect("Select libraries to install:");
            for lib in &config.libraries_catalog {
                multi = multi.item(lib.clone(), lib, "");
            }
            multi
                .required(false)
                .interact()
                .map_err(ScaffoldError::Prompt)?
        }
    };

    let package_manager = match args.package_manager {
        Some(pm) => pm,
        None => {
            let mut select = cliclack::select("Choose a package manager:");
            for pm in PackageManager::ALL {
                select = select.item(pm, pm.executable(), "");
            }
            select
                .initial_value(PackageManager::default())
                .interact()
                .map_err(ScaffoldError::Prompt)?
        }
    };

    let install_pods = if !config.include_pods_stage {
        false
    } else {
        match args.install_pods {
            Some(flag) => flag,
            None => cliclack::confirm("Do you want to install CocoaPods for iOS?")
                .initial_value(true)
                .interact()
                .map_err(ScaffoldError::Prompt)?,
        }
    };

    Ok(Answers {
        project_name,
        application_id,
        libraries,
        package_manager,
        install_pods,
    })
}

/// Returns true when the pods stage was dropped because CocoaPods is missing
fn check_tools(request: &mut GenerationRequest, args: &CreateArgs) -> Result<bool> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    let preflight = tool::check_tools(request.package_manager, request.install_pods);

    if let Err(e) = preflight.ensure_required() {
        spinner.stop("Missing tools");
        cliclack::log::error(format!("{}", e))?;
        anyhow::bail!("Please install the missing tools and try again.");
    }
    spinner.stop(format!("Detected tools: {}", preflight.summary()));

    if preflight.pods_missing {
        handle_missing_pods(request, args)?;
        return Ok(true);
    }

    Ok(false)
}

fn handle_missing_pods(request: &mut GenerationRequest, args: &CreateArgs) -> Result<()> {
    cliclack::log::warning(format!("{} is not installed", COCOAPODS.display_name))?;

    if args.yes {
        cliclack::log::info("Continuing without CocoaPods (--yes mode)")?;
        request.install_pods = false;
        return Ok(());
    }

    let action: &str = cliclack::select("What would you like to do?")
        .item("skip", "Skip CocoaPods and continue", "")
        .item(
            "docs",
            format!("Open installation guide ({})", COCOAPODS.docs_url),
            "",
        )
        .item("abort", "Abort", "")
        .interact()
        .map_err(ScaffoldError::Prompt)?;

    match action {
        "skip" => {
            cliclack::log::info(format!(
                "Continuing without CocoaPods. Run `pod install` in {} later.",
                request.target_path.join("ios").display()
            ))?;
            request.install_pods = false;
        }
        "docs" => {
            tool::open_docs(&COCOAPODS)?;
            cliclack::outro("After installing CocoaPods, run this command again.")?;
            std::process::exit(0);
        }
        _ => anyhow::bail!("Setup cancelled."),
    }

    Ok(())
}

fn next_steps(
    request: &GenerationRequest,
    report: &PipelineReport,
    pods_deferred: bool,
) -> Vec<String> {
    let mut steps = vec![format!("cd {}", request.project_name)];

    // Only worth suggesting when there is an iOS project to install into
    if pods_deferred && !report.pods_installed && request.target_path.join("ios").is_dir() {
        steps.push("cd ios && pod install && cd ..".to_string());
    }
    steps.push("npx react-native run-ios".to_string());
    steps.push("npx react-native run-android".to_string());

    steps
}

fn print_next_steps(
    request: &GenerationRequest,
    report: &PipelineReport,
    pods_deferred: bool,
) -> Result<()> {
    println!();
    println!("  Next steps");
    println!();

    for (i, step) in next_steps(request, report, pods_deferred).iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Stage;
    use std::path::Path;

    fn args() -> CreateArgs {
        CreateArgs {
            name: Some("MyApp".to_string()),
            application_id: Some("com.example.myapp".to_string()),
            yes: true,
            ..CreateArgs::default()
        }
    }

    #[test]
    fn test_non_interactive_defaults() {
        let answers = non_interactive_answers(&PipelineConfig::full(), &args()).unwrap();
        assert_eq!(answers.package_manager, PackageManager::Npm);
        assert!(answers.install_pods);
        assert!(answers.libraries.is_empty());
    }

    #[test]
    fn test_non_interactive_requires_name() {
        let mut a = args();
        a.name = None;
        let err = non_interactive_answers(&PipelineConfig::full(), &a).unwrap_err();
        assert!(matches!(err, ScaffoldError::Validation(_)));

        a.name = Some(String::new());
        assert!(non_interactive_answers(&PipelineConfig::full(), &a).is_err());
    }

    #[test]
    fn test_non_interactive_rejects_bad_application_id() {
        let mut a = args();
        a.application_id = Some("com.example-app".to_string());
        assert!(non_interactive_answers(&PipelineConfig::full(), &a).is_err());

        // The lite generator never asks for one
        let answers = non_interactive_answers(&PipelineConfig::lite(), &a).unwrap();
        assert_eq!(answers.application_id, None);
    }

    #[test]
    fn test_non_interactive_library_catalog() {
        let mut a = args();
        a.libraries = Some(vec!["axios".to_string(), "@shopify/flash-list".to_string()]);
        assert!(non_interactive_answers(&PipelineConfig::full(), &a).is_ok());
        assert!(non_interactive_answers(&PipelineConfig::lite(), &a).is_err());
    }

    #[test]
    fn test_non_interactive_pods_flag() {
        let mut a = args();
        a.install_pods = Some(false);
        assert!(!non_interactive_answers(&PipelineConfig::full(), &a).unwrap().install_pods);

        let mut config = PipelineConfig::full();
        config.include_pods_stage = false;
        assert!(!non_interactive_answers(&config, &args()).unwrap().install_pods);
    }

    fn request_in(cwd: &Path) -> GenerationRequest {
        let answers = non_interactive_answers(&PipelineConfig::full(), &args()).unwrap();
        let mut request = GenerationRequest::new(&PipelineConfig::full(), answers, cwd).unwrap();
        // As left by the "skip" choice when CocoaPods is missing
        request.install_pods = false;
        request
    }

    fn report() -> PipelineReport {
        PipelineReport {
            stages: vec![Stage::Fetch, Stage::Rename, Stage::Install, Stage::Repository],
            template_files: 0,
            pods_installed: false,
        }
    }

    fn mentions_pods(steps: &[String]) -> bool {
        steps.iter().any(|s| s.contains("pod install"))
    }

    #[test]
    fn test_next_steps_mentions_deferred_pods() {
        let dir = tempfile::tempdir().unwrap();
        let request = request_in(dir.path());
        std::fs::create_dir_all(request.target_path.join("ios")).unwrap();

        let steps = next_steps(&request, &report(), true);
        assert_eq!(steps[0], "cd MyApp");
        assert!(mentions_pods(&steps));

        // Declined up front: nothing to catch up on
        assert!(!mentions_pods(&next_steps(&request, &report(), false)));
    }

    #[test]
    fn test_next_steps_skip_pods_without_ios_dir() {
        let dir = tempfile::tempdir().unwrap();
        let request = request_in(dir.path());
        std::fs::create_dir_all(&request.target_path).unwrap();

        assert!(!mentions_pods(&next_steps(&request, &report(), true)));
    }

    #[test]
    fn test_next_steps_after_pods_installed() {
        let dir = tempfile::tempdir().unwrap();
        let request = request_in(dir.path());
        std::fs::create_dir_all(request.target_path.join("ios")).unwrap();
        let report = PipelineReport {
            pods_installed: true,
            ..report()
        };

        assert!(!mentions_pods(&next_steps(&request, &report, true)));
    }
}
