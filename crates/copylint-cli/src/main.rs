mod registry;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use copylint_core::{ContentTree, CoreError, load_content};
use copylint_rules::{ContentConfig, RulesError, config_json_schema, load_config};
use copylint_validate::{
    ContentValidator, ExportedReport, Suggestion, ValidationResult, render_report,
};
use registry::{
    RunContext, RunPaths, init_logging, start_run, write_export, write_json, write_report,
};
use settings::{ProjectSettings, SettingsError, load_settings};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("content error: {0}")]
    Content(#[from] CoreError),
    #[error("rules error: {0}")]
    Rules(#[from] RulesError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "copylint", version, about = "Bilingual site content validator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate both content documents against the rules.
    Validate(ValidateArgs),
    /// Print translation gaps and terminology hints as JSON.
    Suggest(InputArgs),
    /// Print the JSON Schema of the rules document.
    Schema,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Project settings file (defaults to ./copylint.toml when present).
    #[arg(long)]
    settings: Option<PathBuf>,
    /// German content document.
    #[arg(long)]
    de: Option<PathBuf>,
    /// English content document.
    #[arg(long)]
    en: Option<PathBuf>,
    /// Rules document.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    inputs: InputArgs,
    /// Fail when warnings are present.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Write the export record (report, rules, recommendation) to this path.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
    /// Record the run (manifest, logs, report) under this directory.
    #[arg(long)]
    run_dir: Option<PathBuf>,
    /// Also print improvement suggestions.
    #[arg(long, default_value_t = false)]
    suggest: bool,
}

/// Input locations after merging flags over project settings.
struct ResolvedInputs {
    de: PathBuf,
    en: PathBuf,
    config: PathBuf,
}

impl ResolvedInputs {
    fn resolve(args: InputArgs, settings: &ProjectSettings) -> Self {
        Self {
            de: args.de.unwrap_or_else(|| settings.content.de.clone()),
            en: args.en.unwrap_or_else(|| settings.content.en.clone()),
            config: args.config.unwrap_or_else(|| settings.content.config.clone()),
        }
    }

    fn load(&self) -> Result<(ContentConfig, ContentTree, ContentTree), CliError> {
        let config = load_config(&self.config)?;
        let de = load_content(&self.de)?;
        let en = load_content(&self.en)?;
        tracing::info!(
            event = "inputs_loaded",
            de = %self.de.display(),
            en = %self.en.display(),
            config = %self.config.display()
        );
        Ok((config, de, en))
    }
}

fn main() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Validate(args) => run_validate(args),
        Command::Suggest(args) => run_suggest(args),
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&config_json_schema())?;
            println!("{schema}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_validate(args: ValidateArgs) -> Result<ExitCode, CliError> {
    let ValidateArgs {
        inputs,
        strict,
        export,
        run_dir,
        suggest,
    } = args;

    let settings = load_settings(inputs.settings.as_deref())?;
    let strict = strict || settings.report.strict;
    let run_dir = run_dir.or_else(|| settings.report.run_dir.clone());
    let inputs = ResolvedInputs::resolve(inputs, &settings);

    let run_id = Uuid::new_v4().to_string();
    let run_paths = match run_dir {
        Some(run_dir) => {
            let ctx = RunContext {
                run_id: run_id.clone(),
                started_at: chrono::Utc::now(),
                run_dir,
                strict,
                de_path: inputs.de.clone(),
                en_path: inputs.en.clone(),
                config_path: inputs.config.clone(),
            };
            let paths = start_run(&ctx)?;
            init_logging(Some(&paths.logs_path))?;
            Some(paths)
        }
        None => {
            init_logging(None)?;
            None
        }
    };

    tracing::info!(event = "run_started", run_id = %run_id, strict = strict);
    let timer = Instant::now();

    let (config, de, en) = inputs.load()?;
    let validator = ContentValidator::new(config);

    let result = validator.validate_all(&de, &en);
    print_result(&result);

    let suggestions = if suggest || run_paths.is_some() {
        validator.suggest_improvements(&de, &en)
    } else {
        Vec::new()
    };
    if suggest {
        print_suggestions(&suggestions)?;
    }

    let exported = validator.export(&result);
    if let Some(path) = &export {
        write_export(path, &exported)?;
        tracing::info!(event = "export_written", path = %path.display());
    }
    if let Some(paths) = &run_paths {
        record_run(paths, &exported, &suggestions)?;
    }

    let failed = run_failed(&result, strict);
    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(
        event = "run_finished",
        status = if failed { "failed" } else { "success" },
        duration_ms = duration_ms
    );

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Errors always fail a run; warnings fail it only in strict mode.
fn run_failed(result: &ValidationResult, strict: bool) -> bool {
    !result.is_valid() || (strict && !result.warnings.is_empty())
}

fn run_suggest(args: InputArgs) -> Result<ExitCode, CliError> {
    let settings = load_settings(args.settings.as_deref())?;
    let inputs = ResolvedInputs::resolve(args, &settings);
    init_logging(None)?;

    let (config, de, en) = inputs.load()?;
    let validator = ContentValidator::new(config);
    print_suggestions(&validator.suggest_improvements(&de, &en))?;
    Ok(ExitCode::SUCCESS)
}

fn record_run(
    paths: &RunPaths,
    exported: &ExportedReport,
    suggestions: &[Suggestion],
) -> Result<(), CliError> {
    write_json(&paths.export_path, exported)?;
    write_report(&paths.report_path, &render_report(exported, suggestions))?;
    tracing::info!(event = "run_recorded", path = %paths.root.display());
    Ok(())
}

fn print_result(result: &ValidationResult) {
    for issue in &result.errors {
        eprintln!("error {} {}: {}", issue.code, issue.path, issue.message);
    }
    for issue in &result.warnings {
        eprintln!("warning {} {}: {}", issue.code, issue.path, issue.message);
    }
    if result.is_valid() {
        println!(
            "content validated with {} warning(s)",
            result.warnings.len()
        );
    } else {
        println!(
            "content validation failed: {} error(s), {} warning(s)",
            result.errors.len(),
            result.warnings.len()
        );
    }
}

fn print_suggestions(suggestions: &[Suggestion]) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(suggestions)?);
    Ok(())
}
