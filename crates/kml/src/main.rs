/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! KML CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "kml")]
#[command(version)]
#[command(about = "Inspect KML files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a KML file and print its placemarks
    Inspect {
        /// Input KML file
        input: PathBuf,

        /// Print the parsed document as JSON
        #[arg(long)]
        json: bool,

        /// TOML file with parse options
        #[arg(long)]
        config: Option<PathBuf>,

        /// Accept this tag as the document root instead of <kml>
        #[arg(long)]
        root_tag: Option<String>,
    },

    /// Parse a coordinate string and print one triple per line
    Coords {
        /// Whitespace-separated "lon,lat,alt" triples
        text: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kml=info,kml_parse=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            input,
            json,
            config,
            root_tag,
        } => commands::inspect::execute(commands::inspect::InspectArgs {
            input,
            json,
            config,
            root_tag,
        }),
        Commands::Coords { text } => commands::coords::execute(&text),
    }
}
