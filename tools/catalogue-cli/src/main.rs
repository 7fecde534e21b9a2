use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

mod handler;
mod map;
mod reader;

use api_types::TransitDocument;
use handler::RequestHandler;
use map::write_map_geojson;
use reader::load_catalogue;

#[derive(Parser, Debug)]
#[command(
    name = "transport-catalogue",
    author,
    version,
    about = "Answer bus network queries from a JSON request document",
    long_about = "Reads a JSON document of base requests (stops with road distances, buses) \
                  and stat requests (bus statistics, buses through a stop, fastest route, map).\n\n\
                  Base requests are loaded in phases: stops, then distances, then buses. \
                  Stat requests are answered in order as a JSON array."
)]
struct Args {
    /// Input JSON document (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output JSON file for responses (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the network map as GeoJSON to this file
    #[arg(long)]
    map_output: Option<PathBuf>,

    /// Write responses without pretty printing
    #[arg(long)]
    compact: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn read_document(input: Option<&PathBuf>) -> Result<TransitDocument> {
    let text = match input {
        Some(path) => {
            if !path.exists() {
                bail!("Input file does not exist: {}", path.display());
            }
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
    };

    serde_json::from_str(&text).context("Failed to parse request document")
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays valid JSON
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    log::info!("=== Transport Catalogue ===");
    match &args.input {
        Some(path) => log::info!("Input: {}", path.display()),
        None => log::info!("Input: <stdin>"),
    }

    // Phase 1: Load the catalogue
    log::info!("");
    log::info!("Phase 1: Loading base requests...");
    let document = read_document(args.input.as_ref())?;
    let mut catalogue = load_catalogue(&document)?;

    // Phase 2: Build the router
    log::info!("");
    log::info!("Phase 2: Building routing graph...");
    let router = catalogue
        .build_router()
        .context("Failed to build routing graph")?;
    log::info!(
        "  {} vertices, {} edges",
        router.graph().vertex_count(),
        router.graph().edge_count()
    );

    // Phase 3: Answer stat requests
    log::info!("");
    log::info!("Phase 3: Answering {} stat requests...", document.stat_requests.len());
    let render_settings = document.render_settings.clone().unwrap_or_default();
    let handler = RequestHandler::new(&catalogue, &router, &render_settings);
    let responses = handler.handle_all(&document.stat_requests)?;

    let json_string = if args.compact {
        serde_json::to_string(&responses)
    } else {
        serde_json::to_string_pretty(&responses)
    }
    .context("Failed to serialize responses")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json_string)
                .with_context(|| format!("Failed to write responses to {}", path.display()))?;
            log::info!("  Wrote responses to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json_string}").context("Failed to write responses")?;
        }
    }

    if let Some(map_path) = &args.map_output {
        write_map_geojson(&catalogue, &render_settings, map_path)
            .context("Failed to write map GeoJSON")?;
    }

    log::info!("");
    log::info!("=== Done ===");

    Ok(())
}
