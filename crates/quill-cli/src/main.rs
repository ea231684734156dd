use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quill_core::Settings;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "Quill - editor core with debounced highlighting and inline completion")]
#[command(version)]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a file with syntax colours
    Highlight {
        file: PathBuf,
        /// Colour theme (Dark, Light, Sepia)
        #[arg(short, long)]
        theme: Option<String>,
        /// Print the text without colour codes
        #[arg(long)]
        plain: bool,
    },
    /// List the tokens of a file
    Tokens {
        file: PathBuf,
        /// Override the language inferred from the extension
        #[arg(short, long)]
        language: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show completion candidates at a position (1-based)
    Complete {
        file: PathBuf,
        #[arg(long)]
        line: usize,
        #[arg(long)]
        col: usize,
    },
    /// Play a JSON event script through the editor
    Replay {
        script: PathBuf,
        /// File to open before the script starts
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print the effective settings
    Config {
        /// Only print the settings file path
        #[arg(long)]
        path: bool,
        /// Write the effective settings back to disk
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let settings = Settings::load_from(&config_path);

    match cli.command {
        Command::Highlight { file, theme, plain } => {
            let out = commands::highlight(&file, theme.as_deref(), plain, settings)?;
            println!("{out}");
        }
        Command::Tokens {
            file,
            language,
            json,
        } => {
            let fallback = settings.editor.fallback_language;
            let rows = commands::tokens(&file, language.as_deref(), fallback)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{}", commands::format_tokens(&rows));
            }
        }
        Command::Complete { file, line, col } => {
            for candidate in commands::complete(&file, line, col, settings)? {
                println!("{}", candidate.text);
            }
        }
        Command::Replay { script, file } => {
            let json = std::fs::read_to_string(&script)
                .with_context(|| format!("cannot read {}", script.display()))?;
            let steps = commands::parse_script(&json)?;
            let report = commands::replay(steps, file, settings).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Config { path, save } => {
            if save {
                settings.save_to(&config_path)?;
            }
            if path {
                println!("{}", config_path.display());
            } else {
                print!("{}", commands::show_config(&settings, &config_path)?);
            }
        }
    }

    Ok(())
}
