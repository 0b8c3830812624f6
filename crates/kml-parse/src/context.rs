/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Context for KML parsing with diagnostic collection.

use crate::element::ElementKind;
use crate::error::CoordinateError;
use std::fmt;
use thiserror::Error;

/// A condition the parser absorbed without failing.
///
/// Every diagnostic is logged through `tracing` when reported, whether or
/// not the context keeps it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// A tag outside the recognized set. Its subtree is kept but ignored.
    #[error("unsupported element <{tag}> ignored")]
    UnsupportedElement { tag: String },

    /// A placemark closed without a geometry.
    #[error("placemark {} discarded: it has no geometry", .name.as_deref().map(|n| format!("'{}'", n)).unwrap_or_else(|| "(unnamed)".to_string()))]
    EmptyPlacemarkDiscarded { name: Option<String> },

    /// A finished child whose parent has no matching capability.
    #[error("<{parent}> does not accept {offered}; dropped")]
    UnmatchedOffer {
        offered: &'static str,
        parent: String,
    },

    /// A `<coordinates>` element whose text did not parse.
    #[error("malformed coordinates: {error}")]
    CoordinateMalformed { error: CoordinateError },

    /// A geometry closed without enough data to build it.
    #[error("<{geometry}> discarded: {reason}")]
    IncompleteGeometry {
        geometry: ElementKind,
        reason: IncompleteReason,
    },
}

/// Why a geometry could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompleteReason {
    MissingCoordinates,
    MalformedCoordinates,
    MissingOuterBoundary,
    NoMembers,
}

impl fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncompleteReason::MissingCoordinates => write!(f, "no coordinates"),
            IncompleteReason::MalformedCoordinates => write!(f, "malformed coordinates"),
            IncompleteReason::MissingOuterBoundary => write!(f, "no outer boundary"),
            IncompleteReason::NoMembers => write!(f, "no member geometries"),
        }
    }
}

/// Context for KML parsing that collects diagnostics.
///
/// Diagnostics accumulate while parsing and can be inspected afterwards,
/// including after a successful parse.
///
/// # Example
///
/// ```rust
/// use kml_parse::{KmlParseContext, ParseOptions, parse_kml_with_context};
///
/// let kml = r#"<kml><Document>
///   <Placemark><name>Nowhere</name></Placemark>
/// </Document></kml>"#;
///
/// let mut ctx = KmlParseContext::new();
/// let document = parse_kml_with_context(kml, &ParseOptions::default(), &mut ctx).unwrap();
/// assert!(document.placemarks.is_empty());
/// assert_eq!(ctx.diagnostics().len(), 1);
/// ```
#[derive(Debug)]
pub struct KmlParseContext {
    /// Accumulated diagnostic messages during parsing.
    diagnostics: Vec<Diagnostic>,

    /// When false, diagnostics are logged but not stored.
    recording: bool,
}

impl Default for KmlParseContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KmlParseContext {
    /// Create a new context that records diagnostics.
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            recording: true,
        }
    }

    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }

    /// Log a diagnostic and, if recording, keep it.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::CoordinateMalformed { .. } | Diagnostic::IncompleteGeometry { .. } => {
                tracing::warn!("{}", diagnostic);
            }
            _ => tracing::debug!("{}", diagnostic),
        }
        if self.recording {
            self.diagnostics.push(diagnostic);
        }
    }

    /// Check if any diagnostics have been collected.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Get all collected diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take all collected diagnostics, leaving the context empty.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
