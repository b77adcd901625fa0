//! share-upload - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use share_upload::{
    cli::Args,
    config::{validate_config, Config, RunMode},
    course::CourseRegistry,
    error::{exit_codes, Error, Result},
    output::{print_banner, print_config_summary, print_error, print_info, print_warning},
    prompt::TerminalPrompter,
    vcs::{GhCli, GitCli},
    workflow::{Publisher, RunOutcome, Workflow},
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(Error::Cancelled) => {
            print_warning("Cancelled");
            ExitCode::from(exit_codes::ABORT as u8)
        }
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Vcs { .. } | Error::PullRequest(_) => {
                    ExitCode::from(exit_codes::VCS_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config_path();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    print_config_summary(
        &config.project_root.display().to_string(),
        &config.upload_dir().display().to_string(),
        &config.options.mode.to_string(),
        config.options.skip_git,
    );

    let registry = CourseRegistry::load(&config.meta_file())?;
    let mut prompter = TerminalPrompter::new();

    let needs_git = config.options.mode == RunMode::Interactive && !config.options.skip_git;
    let git = if needs_git {
        Some(GitCli::open(&config.project_root)?)
    } else {
        None
    };
    let gh = GhCli::new(&config.project_root);

    if let Some(git) = &git {
        if !git.is_clean()? {
            print_warning("The working tree has uncommitted changes; they may end up in the commit");
        }
    }

    let publisher = git.as_ref().map(|vcs| Publisher { vcs, host: &gh });
    let mut workflow = Workflow::new(&config, registry, &mut prompter, publisher);

    match workflow.run()? {
        RunOutcome::NothingToDo => print_info("Nothing to do"),
        RunOutcome::Inspected => {}
        RunOutcome::Applied { processed } => {
            print_info(&format!("{} files added to the site tree", processed))
        }
        RunOutcome::Published { .. } => {}
    }

    Ok(())
}
