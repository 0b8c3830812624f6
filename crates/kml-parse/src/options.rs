/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parse configuration.

use serde::Deserialize;

/// Options controlling a parse.
///
/// Deserializable so front ends can load it from a config file; missing
/// fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    /// The only tag accepted as the document root (case-insensitive).
    pub root_tag: String,

    /// Keep non-fatal diagnostics on the context. They are logged either way.
    pub record_diagnostics: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            root_tag: "kml".to_string(),
            record_diagnostics: true,
        }
    }
}
