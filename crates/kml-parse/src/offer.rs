/*
 * offer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The offer/accept protocol between a finished child and its parent.
//!
//! Each `Accepts*` trait is one capability: the ability to incorporate one
//! kind of child. Container nodes implement the traits for the children they
//! understand and expose them through the capability queries on
//! [`KmlNode`]. A finished child becomes an [`Offer`]; delivering it either
//! hands the payload to the matching capability or gives it back unchanged.

use crate::error::CoordinateError;
use crate::node::KmlNode;
use crate::types::{Coordinate, Document, Geometry, LinearRing, Placemark};

pub trait AcceptsName {
    fn accept_name(&mut self, name: String);
}

pub trait AcceptsDescription {
    fn accept_description(&mut self, description: String);
}

pub trait AcceptsAddress {
    fn accept_address(&mut self, address: String);
}

pub trait AcceptsCoordinates {
    fn accept_coordinates(&mut self, coordinates: Vec<Coordinate>);
}

/// Receives a malformed `<coordinates>` child in place of its payload.
pub trait AcceptsCoordinateFailure {
    fn accept_coordinate_failure(&mut self, error: CoordinateError);
}

pub trait AcceptsLinearRing {
    fn accept_linear_ring(&mut self, ring: LinearRing);
}

pub trait AcceptsOuterBoundary {
    fn accept_outer_boundary(&mut self, ring: LinearRing);
}

pub trait AcceptsInnerBoundary {
    fn accept_inner_boundary(&mut self, ring: LinearRing);
}

pub trait AcceptsGeometry {
    fn accept_geometry(&mut self, geometry: Geometry);
}

pub trait AcceptsPlacemark {
    fn accept_placemark(&mut self, placemark: Placemark);
}

/// Receives the placemarks collected by a `<Folder>`, in markup order.
pub trait AcceptsFolder {
    fn accept_folder(&mut self, placemarks: Vec<Placemark>);
}

pub trait AcceptsDocument {
    fn accept_document(&mut self, document: Document);
}

/// Receives decoded CDATA content.
pub trait AcceptsRawText {
    fn accept_raw_text(&mut self, text: &str);
}

/// What a finished node hands to its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Offer {
    Name(String),
    Description(String),
    Address(String),
    Coordinates(Vec<Coordinate>),
    CoordinateFailure(CoordinateError),
    LinearRing(LinearRing),
    OuterBoundary(LinearRing),
    InnerBoundary(LinearRing),
    Geometry(Geometry),
    Placemark(Placemark),
    Folder(Vec<Placemark>),
    Document(Document),
}

macro_rules! route {
    ($parent:expr, $query:ident, $accept:ident, $variant:ident, $payload:expr) => {
        match $parent.$query() {
            Some(acceptor) => {
                acceptor.$accept($payload);
                Ok(())
            }
            None => Err(Offer::$variant($payload)),
        }
    };
}

impl Offer {
    /// Short description of the offered child, for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Offer::Name(_) => "name",
            Offer::Description(_) => "description",
            Offer::Address(_) => "address",
            Offer::Coordinates(_) => "coordinates",
            Offer::CoordinateFailure(_) => "malformed coordinates",
            Offer::LinearRing(_) => "LinearRing",
            Offer::OuterBoundary(_) => "outerBoundaryIs",
            Offer::InnerBoundary(_) => "innerBoundaryIs",
            Offer::Geometry(geometry) => geometry.type_name(),
            Offer::Placemark(_) => "Placemark",
            Offer::Folder(_) => "Folder",
            Offer::Document(_) => "Document",
        }
    }

    /// Hand this offer to `parent` if it has the matching capability.
    ///
    /// # Errors
    ///
    /// Returns the offer unchanged when the parent does not accept it.
    pub fn deliver(self, parent: &mut dyn KmlNode) -> Result<(), Offer> {
        match self {
            Offer::Name(name) => route!(parent, as_name_acceptor, accept_name, Name, name),
            Offer::Description(text) => route!(
                parent,
                as_description_acceptor,
                accept_description,
                Description,
                text
            ),
            Offer::Address(text) => {
                route!(parent, as_address_acceptor, accept_address, Address, text)
            }
            Offer::Coordinates(coordinates) => route!(
                parent,
                as_coordinates_acceptor,
                accept_coordinates,
                Coordinates,
                coordinates
            ),
            Offer::CoordinateFailure(error) => route!(
                parent,
                as_coordinate_failure_acceptor,
                accept_coordinate_failure,
                CoordinateFailure,
                error
            ),
            Offer::LinearRing(ring) => route!(
                parent,
                as_linear_ring_acceptor,
                accept_linear_ring,
                LinearRing,
                ring
            ),
            Offer::OuterBoundary(ring) => route!(
                parent,
                as_outer_boundary_acceptor,
                accept_outer_boundary,
                OuterBoundary,
                ring
            ),
            Offer::InnerBoundary(ring) => route!(
                parent,
                as_inner_boundary_acceptor,
                accept_inner_boundary,
                InnerBoundary,
                ring
            ),
            Offer::Geometry(geometry) => route!(
                parent,
                as_geometry_acceptor,
                accept_geometry,
                Geometry,
                geometry
            ),
            Offer::Placemark(placemark) => route!(
                parent,
                as_placemark_acceptor,
                accept_placemark,
                Placemark,
                placemark
            ),
            Offer::Folder(placemarks) => route!(
                parent,
                as_folder_acceptor,
                accept_folder,
                Folder,
                placemarks
            ),
            Offer::Document(document) => route!(
                parent,
                as_document_acceptor,
                accept_document,
                Document,
                document
            ),
        }
    }
}
