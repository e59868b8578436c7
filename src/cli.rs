// CLI module - command-line parsing for the config subcommand
//
// `panedeck` with no arguments starts the TUI. `panedeck config` manages the
// config file:
// - --show: effective configuration after env/file/default merge
// - --path: where the config file lives
// - --reset: overwrite the file with the default template
// - --edit: open the file in $EDITOR (created first if missing)

use crate::config::{Config, VERSION};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

/// panedeck - panel compositor for the terminal
#[derive(Parser)]
#[command(name = "panedeck")]
#[command(version = VERSION)]
#[command(about = "Panel compositor and focus coordinator for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long, group = "action")]
        show: bool,

        /// Reset config file to defaults
        #[arg(long, group = "action")]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long, group = "action")]
        edit: bool,

        /// Show config file path
        #[arg(long, group = "action")]
        path: bool,
    },
}

/// What `panedeck config` was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigAction {
    Show,
    Path,
    Reset,
    Edit,
    Usage,
}

impl ConfigAction {
    fn from_flags(show: bool, reset: bool, edit: bool, path: bool) -> Self {
        match (show, reset, edit, path) {
            (_, _, _, true) => Self::Path,
            (true, ..) => Self::Show,
            (_, true, ..) => Self::Reset,
            (_, _, true, _) => Self::Edit,
            _ => Self::Usage,
        }
    }
}

/// Handle CLI commands. Returns true if a command ran (the TUI should not start).
pub fn handle_cli() -> bool {
    let cli = Cli::parse();

    let Some(Commands::Config {
        show,
        reset,
        edit,
        path,
    }) = cli.command
    else {
        return false;
    };

    let result = match ConfigAction::from_flags(show, reset, edit, path) {
        ConfigAction::Show => show_config(),
        ConfigAction::Path => config_file().map(|p| println!("{}", p.display())),
        ConfigAction::Reset => reset_config(),
        ConfigAction::Edit => edit_config(),
        ConfigAction::Usage => {
            print_usage();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    true
}

fn config_file() -> Result<PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn print_usage() {
    println!("Usage: panedeck config [--show|--reset|--edit|--path]");
    println!();
    println!("  --show    Display effective configuration");
    println!("  --reset   Reset config file to defaults");
    println!("  --edit    Open config file in $EDITOR");
    println!("  --path    Show config file path");
}

fn show_config() -> Result<()> {
    let path = config_file()?;
    let source = if path.exists() {
        path.display().to_string()
    } else {
        "defaults (no config file)".to_string()
    };

    println!("# Effective configuration (env > file > defaults)");
    println!("# Source: {}", source);
    println!();
    print!("{}", Config::from_env().to_toml());
    Ok(())
}

fn reset_config() -> Result<()> {
    let path = config_file()?;

    if path.exists() {
        eprint!("Overwrite {} with defaults? [y/N] ", path.display());
        std::io::stderr().flush().ok();

        let mut answer = String::new();
        std::io::stdin()
            .read_line(&mut answer)
            .context("Failed to read answer")?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default()
        .save()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn edit_config() -> Result<()> {
    let path = config_file()?;
    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}' (set $EDITOR)", editor))?;
    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}
