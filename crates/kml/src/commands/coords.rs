/*
 * coords.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Coords command implementation.

use anyhow::{Context, Result};

/// Execute the coords command
pub fn execute(text: &str) -> Result<()> {
    let coordinates =
        kml_parse::parse_coordinates(text).context("Failed to parse coordinate string")?;

    for coordinate in &coordinates {
        println!(
            "{}\t{}\t{}",
            coordinate.longitude, coordinate.latitude, coordinate.altitude
        );
    }
    tracing::debug!(count = coordinates.len(), "Parsed coordinates");
    Ok(())
}
