//! Command-line front end for inspecting and editing NRO homebrew executables.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use nx_nro::Language;
use tracing_subscriber::EnvFilter;

/// Inspect, extract and edit Nintendo Switch NRO files
#[derive(Parser)]
#[command(name = "nrohelper", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output (overrides RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show title metadata and asset availability
    Info {
        /// NRO file
        nro: PathBuf,

        /// Show the title entry for this language (e.g. en-US, ja)
        #[arg(short = 'l', long)]
        language: Option<Language>,
    },

    /// Write asset payloads to files
    Extract {
        /// NRO file
        nro: PathBuf,

        #[command(flatten)]
        targets: ExtractTargets,
    },

    /// Change title metadata in the NACP and save it in place
    Edit {
        /// NRO file
        nro: PathBuf,

        #[command(flatten)]
        fields: EditFields,
    },
}

#[derive(Args)]
#[group(required = true, multiple = true)]
struct ExtractTargets {
    /// Icon destination
    #[arg(long)]
    icon: Option<PathBuf>,

    /// NACP destination
    #[arg(long)]
    control: Option<PathBuf>,

    /// RomFS destination
    #[arg(long)]
    romfs: Option<PathBuf>,

    /// Extract every present asset into DIR as icon.jpg, control.nacp and romfs.romfs
    #[arg(long, value_name = "DIR")]
    all: Option<PathBuf>,
}

#[derive(Args)]
#[group(required = true, multiple = true)]
struct EditFields {
    /// Application name, applied to every language (max 512 bytes)
    #[arg(long)]
    name: Option<String>,

    /// Publisher, applied to every language (max 256 bytes)
    #[arg(long)]
    publisher: Option<String>,

    /// Display version (max 16 bytes)
    #[arg(long)]
    display_version: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { nro, language } => commands::info(&nro, language),
        Commands::Extract { nro, targets } => commands::extract(&nro, &targets),
        Commands::Edit { nro, fields } => commands::edit(&nro, &fields),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
