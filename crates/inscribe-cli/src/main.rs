//! inscribe-cli: command-line client for the processing service.
//!
//! # Usage
//!
//! ```text
//! inscribe-cli --server http://localhost:5000 --text "Happy Birthday" process cake.jpg
//! inscribe-cli --single-line download cake.jpg --output card.png
//! ```

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use inscribe_cli::{CliError, DEFAULT_PREVIEW_PATH, DEFAULT_SERVER, Job};
use inscribe_core::{ClientConfig, OverlayOptions};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Overlay text on an image using an inscribe processing service.
#[derive(Parser)]
#[command(name = "inscribe-cli", version)]
struct Cli {
    /// Base URL of the processing service.
    #[arg(long, global = true, default_value = DEFAULT_SERVER)]
    server: String,

    /// Overlay text.
    #[arg(long, global = true, default_value_t = String::from(OverlayOptions::DEFAULT_TEXT))]
    text: String,

    /// Keep the text on a single line.
    #[arg(long, global = true)]
    single_line: bool,

    /// Full client config as a JSON string.
    ///
    /// When provided, `--server` is ignored. Missing fields take their
    /// defaults.
    #[arg(long, global = true)]
    config_json: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send the image to /process and save the preview.
    Process {
        /// Input image (PNG, JPEG, GIF, BMP, WebP, ...).
        image: PathBuf,

        /// Where to write the preview.
        #[arg(long, default_value = DEFAULT_PREVIEW_PATH)]
        output: PathBuf,
    },

    /// Send the image to /download and save the composite.
    Download {
        /// Input image (PNG, JPEG, GIF, BMP, WebP, ...).
        image: PathBuf,

        /// Where to write the composite (defaults to the configured
        /// download file name).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Go straight to /download without a /process preview first.
        #[arg(long)]
        skip_process: bool,
    },
}

fn config_from_cli(cli: &Cli) -> Result<ClientConfig, CliError> {
    match cli.config_json {
        Some(ref json) => Ok(serde_json::from_str(json)?),
        None => Ok(ClientConfig::with_base_url(cli.server.clone())),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inscribe_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let options = OverlayOptions::new(cli.text.clone(), !cli.single_line);
    let job = match cli.command {
        Command::Process { image, output } => Job::Process { image, output },
        Command::Download {
            image,
            output,
            skip_process,
        } => Job::Download {
            image,
            output,
            skip_process,
        },
    };

    match inscribe_cli::run(config, options, job).await {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
