use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use install_frameworks::{
    install_all, resolve_plans, Cli, Commands, Config, ConsoleFormatter, Format, InstallError,
    Installer, Pip, PlanReport,
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            exit_code(&e)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env(&cli.overrides);
    let pip = Pip::new(&config.python);

    match cli.command.unwrap_or(Commands::Install) {
        Commands::Install => install(&config, &pip),
        Commands::Plan { format } => plan(&config, &pip, format),
    }
}

fn install(config: &Config, pip: &Pip) -> Result<()> {
    ConsoleFormatter::format_header(config);

    let python = pip
        .python_version()
        .with_context(|| format!("Failed to query {}", pip.python().display()))?;
    let plans = resolve_plans(config, &python).context("Failed to resolve packages")?;

    install_all(pip, &plans).context("Failed to install packages")?;
    ConsoleFormatter::format_success(&plans);

    Ok(())
}

fn plan(config: &Config, pip: &Pip, format: Format) -> Result<()> {
    let python = pip
        .python_version()
        .with_context(|| format!("Failed to query {}", pip.python().display()))?;
    let plans = resolve_plans(config, &python).context("Failed to resolve packages")?;

    if format.is_json() {
        let report = PlanReport {
            torch_version: &config.torch_version,
            tensorflow_version: &config.tensorflow_version,
            gpu: config.gpu,
            cuda_version: &config.cuda_version,
            python_version: python.to_string(),
            plans: &plans,
        };
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize plan")?;
        println!("{}", json);
    } else {
        ConsoleFormatter::format_plans(config, &python, &plans);
    }

    Ok(())
}

/// Mirror the pip exit status when pip is what failed.
fn exit_code(e: &anyhow::Error) -> ExitCode {
    match e.downcast_ref::<InstallError>() {
        Some(InstallError::PipFailed { code: Some(code) }) => u8::try_from(*code)
            .ok()
            .filter(|code| *code != 0)
            .map(ExitCode::from)
            .unwrap_or(ExitCode::FAILURE),
        _ => ExitCode::FAILURE,
    }
}
