/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Streaming KML parsing into a typed document model.
//!
//! This crate wraps [`quick-xml`] to turn a KML file into a [`Document`] of
//! [`Placemark`]s and their geometries. Elements are built on a stack as
//! their tags open; each finished child offers its result to its parent,
//! which keeps what it understands and ignores the rest.
//!
//! # Overview
//!
//! The main entry points are:
//! - [`parse_kml`]: Parse a string with default options
//! - [`parse_kml_with_context`]: Parse while collecting [`Diagnostic`]s
//! - [`KmlTreeBuilder`]: Drive the builder directly from [`MarkupEvent`]s
//! - [`parse_coordinates`]: Parse a standalone KML coordinate string
//!
//! # Example
//!
//! ```rust
//! use kml_parse::{Geometry, parse_kml};
//!
//! let document = parse_kml(r#"<kml>
//!   <Document>
//!     <Placemark>
//!       <name>Route</name>
//!       <LineString>
//!         <coordinates>0,0,0 1,1,0 2,1,0</coordinates>
//!       </LineString>
//!     </Placemark>
//!   </Document>
//! </kml>"#).unwrap();
//!
//! let Geometry::LineString(line) = &document.placemarks[0].geometry else {
//!     panic!("expected a line string");
//! };
//! assert_eq!(line.coordinates.len(), 3);
//! ```
//!
//! # Tolerance
//!
//! Unknown elements, placemarks without geometry, and malformed coordinate
//! strings never abort a parse. They are logged through `tracing` and, unless
//! [`ParseOptions::record_diagnostics`] is off, kept on the
//! [`KmlParseContext`]. Only XML syntax errors and structural violations
//! (see [`StructuralViolation`]) are fatal.

pub mod builder;
pub mod context;
pub mod coordinates;
pub mod element;
pub mod entities;
pub mod error;
pub mod event;
pub mod node;
pub mod offer;
pub mod options;
pub mod reader;
pub mod types;

// Re-export main types
pub use builder::{KmlTreeBuilder, ParseStats, build_from_events};
pub use context::{Diagnostic, IncompleteReason, KmlParseContext};
pub use coordinates::parse_coordinates;
pub use element::{ElementKind, create_node};
pub use entities::decode_raw_text;
pub use error::{CoordinateError, KmlError, Result, StructuralViolation};
pub use event::{Attributes, MarkupEvent};
pub use node::{KmlNode, NodeBase, NodeId};
pub use offer::Offer;
pub use options::ParseOptions;
pub use reader::{parse_kml, parse_kml_file, parse_kml_with_context, parse_kml_with_options};
pub use types::{
    Coordinate, Document, Geometry, GeometryCollection, LineString, LinearRing, Placemark, Point,
    Polygon,
};
