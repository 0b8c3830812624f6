/*
 * element.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The closed set of recognized KML elements and the node registry.
//!
//! Tag names are matched case-insensitively. Anything outside the set maps to
//! [`ElementKind::Unsupported`], which still gets a node (so attributes and
//! text are captured and nesting is tracked) but never offers itself to its
//! parent.

use crate::node::{
    BoundaryNode, CoordinatesNode, DocumentNode, FolderNode, GenericNode, KmlNode, KmlRoot,
    LineStringNode, LinearRingNode, MultiGeometryNode, NodeBase, PlacemarkNode, PointNode,
    PolygonNode, TextNode,
};
use std::fmt;

/// Every element kind the registry knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Kml,
    Document,
    Folder,
    Placemark,
    Name,
    Description,
    Address,
    Point,
    LineString,
    LinearRing,
    Polygon,
    OuterBoundaryIs,
    InnerBoundaryIs,
    MultiGeometry,
    Coordinates,
    /// Fallback for tag names outside the recognized set.
    Unsupported,
}

impl ElementKind {
    /// All recognized kinds. [`ElementKind::Unsupported`] is not included.
    pub const ALL: [ElementKind; 15] = [
        ElementKind::Kml,
        ElementKind::Document,
        ElementKind::Folder,
        ElementKind::Placemark,
        ElementKind::Name,
        ElementKind::Description,
        ElementKind::Address,
        ElementKind::Point,
        ElementKind::LineString,
        ElementKind::LinearRing,
        ElementKind::Polygon,
        ElementKind::OuterBoundaryIs,
        ElementKind::InnerBoundaryIs,
        ElementKind::MultiGeometry,
        ElementKind::Coordinates,
    ];

    /// Canonical KML spelling of the tag.
    pub fn tag_name(self) -> &'static str {
        match self {
            ElementKind::Kml => "kml",
            ElementKind::Document => "Document",
            ElementKind::Folder => "Folder",
            ElementKind::Placemark => "Placemark",
            ElementKind::Name => "name",
            ElementKind::Description => "description",
            ElementKind::Address => "address",
            ElementKind::Point => "Point",
            ElementKind::LineString => "LineString",
            ElementKind::LinearRing => "LinearRing",
            ElementKind::Polygon => "Polygon",
            ElementKind::OuterBoundaryIs => "outerBoundaryIs",
            ElementKind::InnerBoundaryIs => "innerBoundaryIs",
            ElementKind::MultiGeometry => "MultiGeometry",
            ElementKind::Coordinates => "coordinates",
            ElementKind::Unsupported => "#unsupported",
        }
    }

    /// Look up a tag name, ignoring ASCII case.
    pub fn from_tag_name(name: &str) -> ElementKind {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.tag_name().eq_ignore_ascii_case(name))
            .unwrap_or(ElementKind::Unsupported)
    }

    pub fn is_supported(self) -> bool {
        self != ElementKind::Unsupported
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag_name())
    }
}

/// Build a fresh, open node for `kind`.
///
/// The base already carries the tag, attributes and parent handle.
pub fn create_node(kind: ElementKind, base: NodeBase) -> Box<dyn KmlNode> {
    match kind {
        ElementKind::Kml => Box::new(KmlRoot::new(base)),
        ElementKind::Document => Box::new(DocumentNode::new(base)),
        ElementKind::Folder => Box::new(FolderNode::new(base)),
        ElementKind::Placemark => Box::new(PlacemarkNode::new(base)),
        ElementKind::Name | ElementKind::Description | ElementKind::Address => {
            Box::new(TextNode::new(kind, base))
        }
        ElementKind::Point => Box::new(PointNode::new(base)),
        ElementKind::LineString => Box::new(LineStringNode::new(base)),
        ElementKind::LinearRing => Box::new(LinearRingNode::new(base)),
        ElementKind::Polygon => Box::new(PolygonNode::new(base)),
        ElementKind::OuterBoundaryIs | ElementKind::InnerBoundaryIs => {
            Box::new(BoundaryNode::new(kind, base))
        }
        ElementKind::MultiGeometry => Box::new(MultiGeometryNode::new(base)),
        ElementKind::Coordinates => Box::new(CoordinatesNode::new(base)),
        ElementKind::Unsupported => Box::new(GenericNode::new(base)),
    }
}
