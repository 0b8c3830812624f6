//! Command implementations for the KML CLI
//!
//! Each command module handles the CLI interface and delegates to
//! kml-parse for the actual parsing.

pub mod coords;
pub mod inspect;
