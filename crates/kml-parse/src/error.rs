/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for KML parsing.
//!
//! Only fatal conditions live here. Conditions the parser absorbs (unknown
//! elements, dropped offers, discarded placemarks, malformed coordinates) are
//! reported as [`Diagnostic`](crate::Diagnostic)s on the parse context instead.

use std::num::ParseFloatError;
use thiserror::Error;

/// Result type alias for kml-parse operations.
pub type Result<T> = std::result::Result<T, KmlError>;

/// Errors that abort a parse. No partial document is returned alongside them.
#[derive(Debug, Error)]
pub enum KmlError {
    /// The underlying XML could not be tokenized.
    #[error("XML syntax error: {message}{}", .position.map(|p| format!(" at byte {}", p)).unwrap_or_default())]
    XmlSyntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<u64>,
    },

    /// The element nesting or root expectation was violated.
    #[error("Structural violation: {0}")]
    Structural(#[from] StructuralViolation),

    /// The root element closed without ever accepting a `<Document>`.
    #[error("KML root element contains no <Document>")]
    MissingDocument,

    /// Failed to read the input file.
    #[error("Failed to read KML file: {0}")]
    Io(#[from] std::io::Error),
}

/// Violations of the open/close nesting or of the root-type expectation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralViolation {
    /// The first element is not the designated root tag.
    #[error("expected <{expected}> root element, found <{found}>")]
    UnexpectedRoot { expected: String, found: String },

    /// An element was opened after the root element already closed.
    #[error("element <{found}> appears after the root element closed")]
    MultipleRoots { found: String },

    /// Text arrived while no element was open.
    #[error("text content outside of the root element")]
    TextOutsideRoot,

    /// A closing tag arrived while no element was open.
    #[error("closing tag </{found}> without a matching open element")]
    CloseWithoutOpen { found: String },

    /// A closing tag does not match the innermost open element.
    #[error("closing tag </{found}> does not match open element <{expected}>")]
    MismatchedClose { expected: String, found: String },

    /// The last element popped off the stack is not the root wrapper.
    #[error("document ended on <{found}> instead of the root element")]
    NonRootAtEnd { found: String },

    /// Input ended while elements were still open.
    #[error("input ended before </{open}> was closed")]
    UnclosedElement { open: String },

    /// Input ended without any root element.
    #[error("empty KML document: no root element found")]
    EmptyDocument,
}

/// A coordinate string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// A tuple did not have exactly three comma-separated components.
    #[error("coordinate #{index} '{triple}' has {found} components, expected 3")]
    WrongArity {
        index: usize,
        triple: String,
        found: usize,
    },

    /// A component is not a decimal number.
    #[error("coordinate #{index} '{triple}' has invalid component '{component}': {source}")]
    InvalidNumber {
        index: usize,
        triple: String,
        component: String,
        source: ParseFloatError,
    },

    /// A component parsed as infinity or NaN.
    #[error("coordinate #{index} '{triple}' has non-finite component '{component}'")]
    NonFinite {
        index: usize,
        triple: String,
        component: String,
    },
}
