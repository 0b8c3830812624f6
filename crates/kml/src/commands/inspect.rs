/*
 * inspect.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Inspect command implementation.
//!
//! Parses a KML file and prints either a one-line summary per placemark or
//! the whole document as JSON. Diagnostics go to stderr through `tracing`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use kml_parse::{Document, KmlParseContext, ParseOptions, parse_kml_file};

/// Arguments for the inspect command
#[derive(Debug)]
pub struct InspectArgs {
    /// Input KML file
    pub input: PathBuf,
    /// Print JSON instead of the summary table
    pub json: bool,
    /// Optional TOML file with parse options
    pub config: Option<PathBuf>,
    /// Root tag override, applied after the config file
    pub root_tag: Option<String>,
}

/// Execute the inspect command
pub fn execute(args: InspectArgs) -> Result<()> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => ParseOptions::default(),
    };
    if let Some(root_tag) = args.root_tag {
        options.root_tag = root_tag;
    }
    debug!(?options, "Parse options");

    let mut ctx = KmlParseContext::new();
    let document = parse_kml_file(&args.input, &options, &mut ctx)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print!("{}", render_summary(&document));
    }

    if ctx.has_diagnostics() {
        info!(count = ctx.diagnostics().len(), "Parsed with diagnostics");
        for diagnostic in ctx.diagnostics() {
            eprintln!("note: {}", diagnostic);
        }
    }
    Ok(())
}

fn load_options(path: &Path) -> Result<ParseOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}

fn render_summary(document: &Document) -> String {
    let mut out = format!(
        "{} ({} placemarks)\n",
        document.name.as_deref().unwrap_or("Untitled document"),
        document.placemarks.len()
    );
    for placemark in &document.placemarks {
        out.push_str(&format!(
            "  {:<14} {:>6}  {}\n",
            placemark.geometry.type_name(),
            placemark.geometry.coordinate_count(),
            placemark.name.as_deref().unwrap_or("-")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kml_parse::{Coordinate, Geometry, Placemark, Point};

    #[test]
    fn test_render_summary() {
        let document = Document {
            id: None,
            name: Some("Tour".to_string()),
            placemarks: vec![Placemark {
                id: None,
                name: Some("Pier".to_string()),
                description: None,
                address: None,
                geometry: Geometry::Point(Point {
                    coordinate: Coordinate::new(1.0, 2.0, 3.0),
                }),
            }],
        };
        assert_eq!(
            render_summary(&document),
            "Tour (1 placemarks)\n  Point               1  Pier\n"
        );
    }

    #[test]
    fn test_untitled_document() {
        let summary = render_summary(&Document::default());
        assert_eq!(summary, "Untitled document (0 placemarks)\n");
    }
}
