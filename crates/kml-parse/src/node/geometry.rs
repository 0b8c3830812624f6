/*
 * node/geometry.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Geometry nodes and the polygon boundary wrappers.
//!
//! A malformed `<coordinates>` child poisons the nearest enclosing geometry.
//! `LinearRing` and the boundary wrappers pass the failure upward; `Point`,
//! `LineString` and `Polygon` then finalize without offering anything.

use super::{KmlNode, NodeBase, node_base_impl};
use crate::context::{Diagnostic, IncompleteReason, KmlParseContext};
use crate::element::ElementKind;
use crate::error::CoordinateError;
use crate::offer::{
    AcceptsCoordinateFailure, AcceptsCoordinates, AcceptsGeometry, AcceptsInnerBoundary,
    AcceptsLinearRing, AcceptsOuterBoundary, Offer,
};
use crate::types::{
    Coordinate, Geometry, GeometryCollection, LineString, LinearRing, Point, Polygon,
};

/// Coordinates collected by a geometry, or the failure that replaced them.
#[derive(Debug, Default)]
enum CoordinateSlot {
    #[default]
    Empty,
    Parsed(Vec<Coordinate>),
    Malformed(CoordinateError),
}

impl CoordinateSlot {
    fn set(&mut self, coordinates: Vec<Coordinate>) {
        // A failure sticks even if a later sibling parses cleanly.
        if !matches!(self, CoordinateSlot::Malformed(_)) {
            *self = CoordinateSlot::Parsed(coordinates);
        }
    }

    fn fail(&mut self, error: CoordinateError) {
        *self = CoordinateSlot::Malformed(error);
    }
}

fn report_incomplete(ctx: &mut KmlParseContext, geometry: ElementKind, reason: IncompleteReason) {
    ctx.report(Diagnostic::IncompleteGeometry { geometry, reason });
}

#[derive(Debug)]
pub struct PointNode {
    base: NodeBase,
    coordinates: CoordinateSlot,
}

impl PointNode {
    pub fn new(base: NodeBase) -> Self {
        Self {
            base,
            coordinates: CoordinateSlot::Empty,
        }
    }
}

impl KmlNode for PointNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        ElementKind::Point
    }

    fn finish(self: Box<Self>, ctx: &mut KmlParseContext) -> Option<Offer> {
        match self.coordinates {
            CoordinateSlot::Parsed(coordinates) if !coordinates.is_empty() => {
                Some(Offer::Geometry(Geometry::Point(Point {
                    coordinate: coordinates[0],
                })))
            }
            CoordinateSlot::Malformed(_) => {
                report_incomplete(ctx, ElementKind::Point, IncompleteReason::MalformedCoordinates);
                None
            }
            _ => {
                report_incomplete(ctx, ElementKind::Point, IncompleteReason::MissingCoordinates);
                None
            }
        }
    }

    fn as_coordinates_acceptor(&mut self) -> Option<&mut dyn AcceptsCoordinates> {
        Some(self)
    }

    fn as_coordinate_failure_acceptor(&mut self) -> Option<&mut dyn AcceptsCoordinateFailure> {
        Some(self)
    }
}

impl AcceptsCoordinates for PointNode {
    fn accept_coordinates(&mut self, coordinates: Vec<Coordinate>) {
        self.coordinates.set(coordinates);
    }
}

impl AcceptsCoordinateFailure for PointNode {
    fn accept_coordinate_failure(&mut self, error: CoordinateError) {
        self.coordinates.fail(error);
    }
}

#[derive(Debug)]
pub struct LineStringNode {
    base: NodeBase,
    coordinates: CoordinateSlot,
}

impl LineStringNode {
    pub fn new(base: NodeBase) -> Self {
        Self {
            base,
            coordinates: CoordinateSlot::Empty,
        }
    }
}

impl KmlNode for LineStringNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        ElementKind::LineString
    }

    fn finish(self: Box<Self>, ctx: &mut KmlParseContext) -> Option<Offer> {
        match self.coordinates {
            CoordinateSlot::Parsed(coordinates) if !coordinates.is_empty() => {
                Some(Offer::Geometry(Geometry::LineString(LineString {
                    coordinates,
                })))
            }
            CoordinateSlot::Malformed(_) => {
                report_incomplete(
                    ctx,
                    ElementKind::LineString,
                    IncompleteReason::MalformedCoordinates,
                );
                None
            }
            _ => {
                report_incomplete(
                    ctx,
                    ElementKind::LineString,
                    IncompleteReason::MissingCoordinates,
                );
                None
            }
        }
    }

    fn as_coordinates_acceptor(&mut self) -> Option<&mut dyn AcceptsCoordinates> {
        Some(self)
    }

    fn as_coordinate_failure_acceptor(&mut self) -> Option<&mut dyn AcceptsCoordinateFailure> {
        Some(self)
    }
}

impl AcceptsCoordinates for LineStringNode {
    fn accept_coordinates(&mut self, coordinates: Vec<Coordinate>) {
        self.coordinates.set(coordinates);
    }
}

impl AcceptsCoordinateFailure for LineStringNode {
    fn accept_coordinate_failure(&mut self, error: CoordinateError) {
        self.coordinates.fail(error);
    }
}

/// `<LinearRing>`: wraps one `<coordinates>` child for a polygon boundary.
#[derive(Debug)]
pub struct LinearRingNode {
    base: NodeBase,
    coordinates: CoordinateSlot,
}

impl LinearRingNode {
    pub fn new(base: NodeBase) -> Self {
        Self {
            base,
            coordinates: CoordinateSlot::Empty,
        }
    }
}

impl KmlNode for LinearRingNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        ElementKind::LinearRing
    }

    fn finish(self: Box<Self>, _ctx: &mut KmlParseContext) -> Option<Offer> {
        match self.coordinates {
            CoordinateSlot::Empty => Some(Offer::LinearRing(LinearRing::default())),
            CoordinateSlot::Parsed(coordinates) => {
                Some(Offer::LinearRing(LinearRing { coordinates }))
            }
            CoordinateSlot::Malformed(error) => Some(Offer::CoordinateFailure(error)),
        }
    }

    fn as_coordinates_acceptor(&mut self) -> Option<&mut dyn AcceptsCoordinates> {
        Some(self)
    }

    fn as_coordinate_failure_acceptor(&mut self) -> Option<&mut dyn AcceptsCoordinateFailure> {
        Some(self)
    }
}

impl AcceptsCoordinates for LinearRingNode {
    fn accept_coordinates(&mut self, coordinates: Vec<Coordinate>) {
        self.coordinates.set(coordinates);
    }
}

impl AcceptsCoordinateFailure for LinearRingNode {
    fn accept_coordinate_failure(&mut self, error: CoordinateError) {
        self.coordinates.fail(error);
    }
}

/// `<outerBoundaryIs>` or `<innerBoundaryIs>`.
///
/// Tags the ring it wraps as the polygon's outer or inner boundary. A bare
/// `<coordinates>` child is treated as the ring.
#[derive(Debug)]
pub struct BoundaryNode {
    kind: ElementKind,
    base: NodeBase,
    ring: Option<LinearRing>,
    failure: Option<CoordinateError>,
}

impl BoundaryNode {
    pub fn new(kind: ElementKind, base: NodeBase) -> Self {
        debug_assert!(matches!(
            kind,
            ElementKind::OuterBoundaryIs | ElementKind::InnerBoundaryIs
        ));
        Self {
            kind,
            base,
            ring: None,
            failure: None,
        }
    }
}

impl KmlNode for BoundaryNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn finish(self: Box<Self>, _ctx: &mut KmlParseContext) -> Option<Offer> {
        if let Some(error) = self.failure {
            return Some(Offer::CoordinateFailure(error));
        }
        let Some(ring) = self.ring else {
            tracing::debug!(boundary = %self.kind, "Boundary without a ring");
            return None;
        };
        match self.kind {
            ElementKind::OuterBoundaryIs => Some(Offer::OuterBoundary(ring)),
            _ => Some(Offer::InnerBoundary(ring)),
        }
    }

    fn as_linear_ring_acceptor(&mut self) -> Option<&mut dyn AcceptsLinearRing> {
        Some(self)
    }

    fn as_coordinates_acceptor(&mut self) -> Option<&mut dyn AcceptsCoordinates> {
        Some(self)
    }

    fn as_coordinate_failure_acceptor(&mut self) -> Option<&mut dyn AcceptsCoordinateFailure> {
        Some(self)
    }
}

impl AcceptsLinearRing for BoundaryNode {
    fn accept_linear_ring(&mut self, ring: LinearRing) {
        self.ring = Some(ring);
    }
}

impl AcceptsCoordinates for BoundaryNode {
    fn accept_coordinates(&mut self, coordinates: Vec<Coordinate>) {
        self.ring = Some(LinearRing { coordinates });
    }
}

impl AcceptsCoordinateFailure for BoundaryNode {
    fn accept_coordinate_failure(&mut self, error: CoordinateError) {
        self.failure = Some(error);
    }
}

#[derive(Debug)]
pub struct PolygonNode {
    base: NodeBase,
    outer: Option<LinearRing>,
    inner: Vec<LinearRing>,
    failure: Option<CoordinateError>,
}

impl PolygonNode {
    pub fn new(base: NodeBase) -> Self {
        Self {
            base,
            outer: None,
            inner: Vec::new(),
            failure: None,
        }
    }

    pub fn outer(&self) -> Option<&LinearRing> {
        self.outer.as_ref()
    }

    pub fn inner(&self) -> &[LinearRing] {
        &self.inner
    }
}

impl KmlNode for PolygonNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        ElementKind::Polygon
    }

    fn finish(self: Box<Self>, ctx: &mut KmlParseContext) -> Option<Offer> {
        if self.failure.is_some() {
            report_incomplete(
                ctx,
                ElementKind::Polygon,
                IncompleteReason::MalformedCoordinates,
            );
            return None;
        }
        // An outer ring without coordinates bounds nothing.
        let Some(outer) = self.outer.filter(|ring| !ring.coordinates.is_empty()) else {
            report_incomplete(
                ctx,
                ElementKind::Polygon,
                IncompleteReason::MissingOuterBoundary,
            );
            return None;
        };
        let inner = self
            .inner
            .into_iter()
            .filter(|ring| !ring.coordinates.is_empty())
            .collect();
        Some(Offer::Geometry(Geometry::Polygon(Polygon { outer, inner })))
    }

    fn as_outer_boundary_acceptor(&mut self) -> Option<&mut dyn AcceptsOuterBoundary> {
        Some(self)
    }

    fn as_inner_boundary_acceptor(&mut self) -> Option<&mut dyn AcceptsInnerBoundary> {
        Some(self)
    }

    fn as_coordinate_failure_acceptor(&mut self) -> Option<&mut dyn AcceptsCoordinateFailure> {
        Some(self)
    }
}

impl AcceptsOuterBoundary for PolygonNode {
    fn accept_outer_boundary(&mut self, ring: LinearRing) {
        self.outer = Some(ring);
    }
}

impl AcceptsInnerBoundary for PolygonNode {
    fn accept_inner_boundary(&mut self, ring: LinearRing) {
        self.inner.push(ring);
    }
}

impl AcceptsCoordinateFailure for PolygonNode {
    fn accept_coordinate_failure(&mut self, error: CoordinateError) {
        self.failure = Some(error);
    }
}

/// `<MultiGeometry>`: a collection of member geometries.
///
/// A member that failed to build is simply absent; the collection survives.
#[derive(Debug)]
pub struct MultiGeometryNode {
    base: NodeBase,
    geometries: Vec<Geometry>,
}

impl MultiGeometryNode {
    pub fn new(base: NodeBase) -> Self {
        Self {
            base,
            geometries: Vec::new(),
        }
    }
}

impl KmlNode for MultiGeometryNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        ElementKind::MultiGeometry
    }

    fn finish(self: Box<Self>, ctx: &mut KmlParseContext) -> Option<Offer> {
        if self.geometries.is_empty() {
            report_incomplete(
                ctx,
                ElementKind::MultiGeometry,
                IncompleteReason::NoMembers,
            );
            return None;
        }
        Some(Offer::Geometry(Geometry::Collection(GeometryCollection {
            geometries: self.geometries,
        })))
    }

    fn as_geometry_acceptor(&mut self) -> Option<&mut dyn AcceptsGeometry> {
        Some(self)
    }
}

impl AcceptsGeometry for MultiGeometryNode {
    fn accept_geometry(&mut self, geometry: Geometry) {
        self.geometries.push(geometry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;
    use std::collections::HashMap;

    fn base(kind: ElementKind) -> NodeBase {
        NodeBase::new(kind.tag_name(), Some(NodeId::new(0)), HashMap::new())
    }

    fn coords(n: usize) -> Vec<Coordinate> {
        (0..n).map(|i| Coordinate::new(i as f64, 1.0, 0.0)).collect()
    }

    fn arity_error() -> CoordinateError {
        CoordinateError::WrongArity {
            index: 0,
            triple: "1,2".to_string(),
            found: 2,
        }
    }

    #[test]
    fn test_point_takes_first_coordinate() {
        let mut point = Box::new(PointNode::new(base(ElementKind::Point)));
        point.accept_coordinates(coords(2));
        let mut ctx = KmlParseContext::new();
        assert_eq!(
            point.finish(&mut ctx),
            Some(Offer::Geometry(Geometry::Point(Point {
                coordinate: Coordinate::new(0.0, 1.0, 0.0)
            })))
        );
    }

    #[test]
    fn test_point_without_coordinates_is_incomplete() {
        let point = Box::new(PointNode::new(base(ElementKind::Point)));
        let mut ctx = KmlParseContext::new();
        assert_eq!(point.finish(&mut ctx), None);
        assert_eq!(
            ctx.diagnostics(),
            &[Diagnostic::IncompleteGeometry {
                geometry: ElementKind::Point,
                reason: IncompleteReason::MissingCoordinates,
            }]
        );
    }

    #[test]
    fn test_failure_sticks_over_later_coordinates() {
        let mut line = Box::new(LineStringNode::new(base(ElementKind::LineString)));
        line.accept_coordinate_failure(arity_error());
        line.accept_coordinates(coords(3));
        let mut ctx = KmlParseContext::new();
        assert_eq!(line.finish(&mut ctx), None);
        assert!(matches!(
            ctx.diagnostics(),
            [Diagnostic::IncompleteGeometry {
                reason: IncompleteReason::MalformedCoordinates,
                ..
            }]
        ));
    }

    #[test]
    fn test_ring_forwards_failure() {
        let mut ring = Box::new(LinearRingNode::new(base(ElementKind::LinearRing)));
        ring.accept_coordinate_failure(arity_error());
        let mut ctx = KmlParseContext::new();
        assert_eq!(
            ring.finish(&mut ctx),
            Some(Offer::CoordinateFailure(arity_error()))
        );
    }

    #[test]
    fn test_boundary_tags_ring_by_kind() {
        let mut outer = Box::new(BoundaryNode::new(
            ElementKind::OuterBoundaryIs,
            base(ElementKind::OuterBoundaryIs),
        ));
        outer.accept_linear_ring(LinearRing {
            coordinates: coords(4),
        });
        let mut inner = Box::new(BoundaryNode::new(
            ElementKind::InnerBoundaryIs,
            base(ElementKind::InnerBoundaryIs),
        ));
        inner.accept_coordinates(coords(3));

        let mut ctx = KmlParseContext::new();
        assert!(matches!(
            outer.finish(&mut ctx),
            Some(Offer::OuterBoundary(ring)) if ring.coordinates.len() == 4
        ));
        assert!(matches!(
            inner.finish(&mut ctx),
            Some(Offer::InnerBoundary(ring)) if ring.coordinates.len() == 3
        ));
    }

    #[test]
    fn test_polygon_requires_outer_boundary() {
        let mut polygon = Box::new(PolygonNode::new(base(ElementKind::Polygon)));
        polygon.accept_inner_boundary(LinearRing {
            coordinates: coords(4),
        });
        let mut ctx = KmlParseContext::new();
        assert_eq!(polygon.finish(&mut ctx), None);
        assert!(matches!(
            ctx.diagnostics(),
            [Diagnostic::IncompleteGeometry {
                geometry: ElementKind::Polygon,
                reason: IncompleteReason::MissingOuterBoundary,
            }]
        ));
    }

    #[test]
    fn test_polygon_with_empty_outer_ring_is_incomplete() {
        let mut polygon = Box::new(PolygonNode::new(base(ElementKind::Polygon)));
        polygon.accept_outer_boundary(LinearRing::default());
        let mut ctx = KmlParseContext::new();
        assert_eq!(polygon.finish(&mut ctx), None);
        assert!(matches!(
            ctx.diagnostics(),
            [Diagnostic::IncompleteGeometry {
                geometry: ElementKind::Polygon,
                reason: IncompleteReason::MissingOuterBoundary,
            }]
        ));
    }

    #[test]
    fn test_polygon_drops_empty_inner_rings() {
        let mut polygon = Box::new(PolygonNode::new(base(ElementKind::Polygon)));
        polygon.accept_outer_boundary(LinearRing {
            coordinates: coords(4),
        });
        polygon.accept_inner_boundary(LinearRing::default());
        polygon.accept_inner_boundary(LinearRing {
            coordinates: coords(3),
        });
        let mut ctx = KmlParseContext::new();
        let Some(Offer::Geometry(Geometry::Polygon(result))) = polygon.finish(&mut ctx) else {
            panic!("expected a polygon offer");
        };
        assert_eq!(result.inner.len(), 1);
        assert_eq!(result.inner[0].coordinates.len(), 3);
        assert!(!ctx.has_diagnostics());
    }

    #[test]
    fn test_multi_geometry_collects_members() {
        let mut multi = Box::new(MultiGeometryNode::new(base(ElementKind::MultiGeometry)));
        multi.accept_geometry(Geometry::Point(Point {
            coordinate: Coordinate::new(1.0, 1.0, 0.0),
        }));
        multi.accept_geometry(Geometry::LineString(LineString {
            coordinates: coords(2),
        }));
        let mut ctx = KmlParseContext::new();
        match multi.finish(&mut ctx) {
            Some(Offer::Geometry(Geometry::Collection(collection))) => {
                assert_eq!(collection.geometries.len(), 2);
            }
            other => panic!("expected a collection, got {:?}", other),
        }
    }
}
