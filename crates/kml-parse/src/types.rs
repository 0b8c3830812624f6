/*
 * types.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The finished document model.
//!
//! These are plain owned values produced once parsing completes. The
//! in-progress node types that build them live in [`crate::node`].

use serde::Serialize;

/// A single `longitude,latitude,altitude` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64, altitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            altitude,
        }
    }
}

/// A parsed KML `<Document>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    /// Value of the `id` attribute, if present.
    pub id: Option<String>,

    /// Text of the document's own `<name>` child.
    pub name: Option<String>,

    /// Placemarks in markup order, including those nested in folders.
    ///
    /// Placemarks without a geometry are not included.
    pub placemarks: Vec<Placemark>,
}

/// A `<Placemark>` that carried a geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placemark {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub geometry: Geometry,
}

/// The geometry attached to a placemark.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    /// KML `<MultiGeometry>`.
    Collection(GeometryCollection),
}

impl Geometry {
    /// Human-readable geometry type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::Collection(_) => "MultiGeometry",
        }
    }

    /// Total number of coordinate tuples in this geometry, including rings
    /// and collection members.
    pub fn coordinate_count(&self) -> usize {
        match self {
            Geometry::Point(_) => 1,
            Geometry::LineString(line) => line.coordinates.len(),
            Geometry::Polygon(polygon) => {
                polygon.outer.coordinates.len()
                    + polygon
                        .inner
                        .iter()
                        .map(|ring| ring.coordinates.len())
                        .sum::<usize>()
            }
            Geometry::Collection(collection) => collection
                .geometries
                .iter()
                .map(Geometry::coordinate_count)
                .sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineString {
    pub coordinates: Vec<Coordinate>,
}

/// A closed ring of coordinates bounding a polygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinearRing {
    pub coordinates: Vec<Coordinate>,
}

impl LinearRing {
    /// Whether the first and last coordinates coincide.
    pub fn is_closed(&self) -> bool {
        match (self.coordinates.first(), self.coordinates.last()) {
            (Some(first), Some(last)) => self.coordinates.len() > 1 && first == last,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub outer: LinearRing,
    pub inner: Vec<LinearRing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeometryCollection {
    pub geometries: Vec<Geometry>,
}
