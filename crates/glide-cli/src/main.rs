use std::str::FromStr;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use glide_core::AppConfig;
use glide_tui::Variant;

mod commands;

#[derive(Parser)]
#[command(name = "glide")]
#[command(author, version, about = "Scroll-reveal choreography for landing pages, previewed in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive preview
    Run {
        /// Page variant (smart-home or metaverse)
        #[arg(short = 'v', long)]
        variant: Option<String>,
    },
    /// Drive the coordinator headlessly and print frame reports
    Simulate {
        /// Page variant (smart-home or metaverse)
        #[arg(short = 'v', long)]
        variant: Option<String>,
        /// Terminal width in cells
        #[arg(long, default_value_t = 100)]
        width: u16,
        /// Terminal height in cells
        #[arg(long, default_value_t = 30)]
        height: u16,
        /// Scroll targets in rows, comma separated (defaults to every section top)
        #[arg(long = "to", value_delimiter = ',')]
        targets: Vec<f64>,
        /// Simulated frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration if none exists
    Init,
    /// Print the configuration file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // The preview owns the screen, so it logs to a file
    let interactive = matches!(cli.command, Some(Commands::Run { .. }) | None);
    init_logging(&config, interactive)?;

    match cli.command {
        Some(Commands::Run { variant }) => {
            let variant = resolve_variant(variant, &config)?;
            commands::run::run(config, variant)
        }
        None => {
            let variant = resolve_variant(None, &config)?;
            commands::run::run(config, variant)
        }
        Some(Commands::Simulate {
            variant,
            width,
            height,
            targets,
            fps,
            json,
        }) => {
            let variant = resolve_variant(variant, &config)?;
            let args = commands::simulate::SimulateArgs {
                variant,
                width,
                height,
                targets,
                fps,
                json,
            };
            commands::simulate::run(config, &args)
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init => commands::config::init(),
            ConfigAction::Path => commands::config::path(),
        },
    }
}

fn resolve_variant(flag: Option<String>, config: &AppConfig) -> Result<Variant> {
    let name = flag.unwrap_or_else(|| config.ui.variant.clone());
    Ok(Variant::from_str(&name)?)
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        std::fs::create_dir_all(config.data_dir())?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
