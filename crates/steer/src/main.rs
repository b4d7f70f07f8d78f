mod lint;
mod runtime;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use lint::LintOnSave;
use runtime::block_on;
use std::io::{self, IsTerminal, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, process};
use steer_core::{Config, HookEvent, HookInput, HookOutput, TelemetryConfig};
use steer_hooks::default_hooks;
use steer_telemetry::init_subscriber;
use tracing::{debug, error, warn};

const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";
const TOOL_INPUT_ENV: &str = "CLAUDE_TOOL_INPUT";

#[derive(Parser)]
#[command(name = "steer")]
#[command(version, about = "Advisory agent routing and failure analysis hooks", long_about = None)]
struct Cli {
    /// Configuration file (defaults to .claude/steer.yml in the project)
    #[arg(short, long, global = true, env = "STEER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a hook payload from stdin and print any advisory
    Hook {
        /// Host event, e.g. UserPromptSubmit or PostToolUse
        event: String,
    },
    /// Format, lint and type-check the file an edit tool just wrote
    LintOnSave,
    /// Write the default configuration file
    Init,
}

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init => {
            init_subscriber(&TelemetryConfig::default());
            if let Err(e) = init_command(cli.config.as_deref()) {
                eprintln!("{} {:#}", "Error:".red(), e);
                process::exit(1);
            }
        }
        Commands::Hook { event } => {
            run_contained(&cli, |config, _| hook_command(config, event));
        }
        Commands::LintOnSave => run_contained(&cli, lint_command),
    }
}

/// Loads configuration, installs logging and runs `f`.
///
/// Hooks must never break the host: errors and panics are logged to stderr
/// and the process still exits 0 with nothing on stdout.
fn run_contained<F>(cli: &Cli, f: F)
where
    F: FnOnce(&Config, &Path) -> Result<()>,
{
    let project_dir = project_dir();
    let config = Config::load(cli.config.as_deref(), Some(project_dir.as_path()));
    let telemetry = config
        .as_ref()
        .map(|c| c.telemetry.clone())
        .unwrap_or_default();
    init_subscriber(&telemetry);

    panic::set_hook(Box::new(|info| error!("hook panicked: {}", info)));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let config = config.context("failed to load configuration")?;
        f(&config, &project_dir)
    }));

    if let Ok(Err(e)) = outcome {
        error!("{:#}", e);
    }
}

fn project_dir() -> PathBuf {
    env::var_os(PROJECT_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Reads and decodes the hook payload. A terminal or blank stdin is no payload.
fn read_payload() -> Result<Option<HookInput>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut raw = String::new();
    stdin
        .lock()
        .read_to_string(&mut raw)
        .context("failed to read hook payload from stdin")?;
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let input = serde_json::from_str(&raw).context("failed to parse hook payload")?;
    Ok(Some(input))
}

fn hook_command(config: &Config, event: &str) -> Result<()> {
    let event: HookEvent = event.parse()?;
    let Some(input) = read_payload()? else {
        debug!(%event, "empty payload");
        return Ok(());
    };

    let registry = default_hooks(config)?;
    debug!(%event, hooks = ?registry.hook_names(), "dispatching");

    if let Some(annotation) = registry.execute_hooks(event, &input) {
        let output = HookOutput::from(annotation);
        println!("{}", serde_json::to_string(&output)?);
    }

    Ok(())
}

/// The edited file comes from `CLAUDE_TOOL_INPUT` when set, else the payload.
fn lint_target() -> Result<Option<String>> {
    if let Ok(raw) = env::var(TOOL_INPUT_ENV) {
        if !raw.trim().is_empty() {
            let value: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse {}", TOOL_INPUT_ENV))?;
            return Ok(value
                .get("file_path")
                .and_then(|p| p.as_str())
                .map(str::to_string));
        }
    }

    Ok(read_payload()?.and_then(|input| input.file_path().map(str::to_string)))
}

fn lint_command(config: &Config, project_dir: &Path) -> Result<()> {
    if !config.lint.enabled {
        return Ok(());
    }

    let Some(file_path) = lint_target()? else {
        debug!("no file to lint");
        return Ok(());
    };
    if !lint::validate_path(&file_path) {
        warn!(path = %file_path, "rejected file path");
        return Ok(());
    }
    if !lint::is_lintable(&file_path) {
        debug!(path = %file_path, "not a JS/TS file");
        return Ok(());
    }

    let linter = LintOnSave::new(
        project_dir,
        Duration::from_secs(config.lint.timeout_secs),
        config.lint.runner.clone(),
    );
    let report = block_on(linter.check(&file_path))?;
    report.print();

    Ok(())
}

fn init_command(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Config::path_in(&project_dir()),
    };

    if path.exists() {
        println!(
            "{} Config already exists: {}",
            "ℹ".bright_blue(),
            path.display()
        );
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, Config::default().to_yaml()?)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("{} Created {}", "✓".bright_green(), path.display());
    println!("\nRegister the hooks in .claude/settings.json:");
    println!("   UserPromptSubmit  → steer hook UserPromptSubmit");
    println!("   PostToolUse Bash  → steer hook PostToolUse");
    println!("   PostToolUse Edit  → steer lint-on-save");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn hook_cli() -> Cli {
        Cli {
            config: None,
            command: Commands::Hook {
                event: "PostToolUse".to_string(),
            },
        }
    }

    #[test]
    fn test_run_contained_survives_panic() {
        let ran = Cell::new(false);
        run_contained(&hook_cli(), |_, _| {
            ran.set(true);
            panic!("classifier blew up");
        });
        let _ = panic::take_hook();

        assert!(ran.get());
    }

    #[test]
    fn test_run_contained_swallows_errors() {
        let ran = Cell::new(false);
        run_contained(&hook_cli(), |_, _| {
            ran.set(true);
            anyhow::bail!("classifier failed")
        });

        assert!(ran.get());
    }

    #[test]
    fn test_cli_parses_global_config_after_subcommand() {
        let cli = Cli::parse_from(["steer", "hook", "UserPromptSubmit", "--config", "x.yml"]);
        assert_eq!(cli.config.as_deref(), Some(Path::new("x.yml")));
        assert!(matches!(
            cli.command,
            Commands::Hook { ref event } if event == "UserPromptSubmit"
        ));
    }
}
