//! Command dispatch

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::OutlineSource;
use crate::application::COURSE_INTRODUCTION;
use crate::cli::args::{Cli, Commands, ConfigCommands, GenerateArgs, OutlineArgs, TargetArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::Plan;
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run the selected command and return the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    match &cli.command {
        None => generate(cli, &GenerateArgs::default()),
        Some(Commands::Generate(args)) => generate(cli, args),
        Some(Commands::Plan { source }) => plan(cli, source),
        Some(Commands::Check { target }) => check(cli, target),
        Some(Commands::Config { command }) => config(cli, command),
        Some(Commands::Completion { shell }) => completion(*shell),
    }
}

/// Directory that anchors local config and relative paths.
fn project_dir(cli: &Cli) -> CliResult<PathBuf> {
    match &cli.project_dir {
        Some(dir) if dir.is_dir() => Ok(dir.clone()),
        Some(dir) => Err(CliError::InvalidArgs(format!(
            "project directory does not exist: {}",
            dir.display()
        ))),
        None => std::env::current_dir()
            .map_err(|e| InfraError::io("determine current directory", e).into()),
    }
}

/// Load settings, apply flag overrides and wire services.
fn container(cli: &Cli, target: &TargetArgs) -> CliResult<ServiceContainer> {
    let project_dir = project_dir(cli)?;
    let mut settings = Settings::load(Some(&project_dir))?;

    if let Some(output) = &target.output {
        settings.output_dir = output.clone();
    }
    if let Some(outline) = &target.source.outline {
        settings.outline = Some(outline.clone());
    }
    if cli.project_dir.is_some() {
        settings = settings.resolved(&project_dir);
    }
    debug!("container: settings={:?}", settings);

    Ok(ServiceContainer::new(settings))
}

fn outline_source(services: &ServiceContainer) -> OutlineSource {
    OutlineSource::from_option(services.settings.outline.clone())
}

#[instrument(skip(cli))]
fn generate(cli: &Cli, args: &GenerateArgs) -> CliResult<i32> {
    let services = container(cli, &args.target)?;
    let outline = services.outline_service().load(&outline_source(&services))?;
    let root = services.settings.output_dir.clone();

    if args.dry_run {
        let plan = Plan::build(&root, COURSE_INTRODUCTION, &outline);
        output::header(&format!("Plan for {}", root.display()));
        for operation in plan.operations() {
            output::planned(operation);
        }
        output::info(&format!(
            "{} directories, {} files (dry run, nothing written)",
            plan.directory_count(),
            plan.file_count()
        ));
        return Ok(exitcode::OK);
    }

    let report = services
        .materialize_service()
        .materialize_with(&root, &outline, output::step)?;

    output::success(&format!(
        "Course materials generation complete: {} directories, {} files",
        report.directories, report.files
    ));
    output::detail(&format!(
        "You can find your course structure in '{}'",
        report.root.display()
    ));
    Ok(exitcode::OK)
}

#[instrument(skip(cli))]
fn plan(cli: &Cli, source: &OutlineArgs) -> CliResult<i32> {
    let target = TargetArgs {
        output: None,
        source: source.clone(),
    };
    let services = container(cli, &target)?;
    let outline = services.outline_service().load(&outline_source(&services))?;

    let label = services.settings.output_dir.display().to_string();
    output::info(&output::outline_tree(&label, &outline));
    output::detail(&format!(
        "{} units, {} lessons",
        outline.nodes().len(),
        outline.lesson_count()
    ));
    Ok(exitcode::OK)
}

#[instrument(skip(cli))]
fn check(cli: &Cli, target: &TargetArgs) -> CliResult<i32> {
    let services = container(cli, target)?;
    let outline = services.outline_service().load(&outline_source(&services))?;
    let status = services
        .check_service()
        .check(&services.settings.output_dir, &outline)?;

    if status.in_sync {
        output::success(&format!("{} is in sync with its outline", status.root.display()));
        return Ok(exitcode::OK);
    }

    output::header(&format!("Drift in {}", status.root.display()));
    for path in &status.missing {
        output::diff_add(&format!("missing  {}", path.display()));
    }
    for path in &status.stale {
        output::diff_change(&format!("stale    {}", path.display()));
    }
    for path in &status.extra {
        output::diff_remove(&format!("extra    {}", path.display()));
    }
    output::detail("run `coursegen generate` to create missing and rewrite stale entries");
    Ok(exitcode::NOT_IN_SYNC)
}

#[instrument(skip(cli))]
fn config(cli: &Cli, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => {
            let services = container(cli, &TargetArgs::default())?;
            output::info(&services.settings.to_toml()?);
        }
        ConfigCommands::Init => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let project_dir = project_dir(cli)?;
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", "(no config directory on this platform)"),
            }
            output::action("local", &local_config_path(&project_dir).display());
        }
    }
    Ok(exitcode::OK)
}

fn completion(shell: clap_complete::Shell) -> CliResult<i32> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(exitcode::OK)
}
