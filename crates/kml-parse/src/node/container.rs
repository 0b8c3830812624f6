/*
 * node/container.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Structural containers: the root wrapper, documents, folders, placemarks.

use super::{KmlNode, NodeBase, node_base_impl};
use crate::context::{Diagnostic, KmlParseContext};
use crate::element::ElementKind;
use crate::offer::{
    AcceptsAddress, AcceptsDescription, AcceptsDocument, AcceptsFolder, AcceptsGeometry,
    AcceptsName, AcceptsPlacemark, Offer,
};
use crate::types::{Document, Geometry, Placemark};

/// The `<kml>` root wrapper. Holds at most one document.
#[derive(Debug)]
pub struct KmlRoot {
    base: NodeBase,
    document: Option<Document>,
}

impl KmlRoot {
    pub fn new(base: NodeBase) -> Self {
        Self {
            base,
            document: None,
        }
    }

    /// Consume the wrapper, yielding the accepted document if any.
    pub fn into_document(self) -> Option<Document> {
        self.document
    }
}

impl KmlNode for KmlRoot {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        ElementKind::Kml
    }

    fn finish(self: Box<Self>, _ctx: &mut KmlParseContext) -> Option<Offer> {
        // Only reached for a root tag nested below the real root.
        tracing::debug!(
            has_document = self.document.is_some(),
            "Dropping nested <{}> element",
            self.base.tag()
        );
        None
    }

    fn as_document_acceptor(&mut self) -> Option<&mut dyn AcceptsDocument> {
        Some(self)
    }
}

impl AcceptsDocument for KmlRoot {
    fn accept_document(&mut self, document: Document) {
        self.document = Some(document);
    }
}

#[derive(Debug)]
pub struct DocumentNode {
    base: NodeBase,
    name: Option<String>,
    placemarks: Vec<Placemark>,
}

impl DocumentNode {
    pub fn new(base: NodeBase) -> Self {
        Self {
            base,
            name: None,
            placemarks: Vec::new(),
        }
    }
}

impl KmlNode for DocumentNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        ElementKind::Document
    }

    fn finish(self: Box<Self>, _ctx: &mut KmlParseContext) -> Option<Offer> {
        Some(Offer::Document(Document {
            id: self.base.id().map(str::to_string),
            name: self.name,
            placemarks: self.placemarks,
        }))
    }

    fn as_name_acceptor(&mut self) -> Option<&mut dyn AcceptsName> {
        Some(self)
    }

    fn as_placemark_acceptor(&mut self) -> Option<&mut dyn AcceptsPlacemark> {
        Some(self)
    }

    fn as_folder_acceptor(&mut self) -> Option<&mut dyn AcceptsFolder> {
        Some(self)
    }
}

impl AcceptsName for DocumentNode {
    fn accept_name(&mut self, name: String) {
        self.name = Some(name);
    }
}

impl AcceptsPlacemark for DocumentNode {
    fn accept_placemark(&mut self, placemark: Placemark) {
        self.placemarks.push(placemark);
    }
}

impl AcceptsFolder for DocumentNode {
    fn accept_folder(&mut self, placemarks: Vec<Placemark>) {
        self.placemarks.extend(placemarks);
    }
}

/// `<Folder>`: groups placemarks and hands them up in order.
#[derive(Debug)]
pub struct FolderNode {
    base: NodeBase,
    name: Option<String>,
    placemarks: Vec<Placemark>,
}

impl FolderNode {
    pub fn new(base: NodeBase) -> Self {
        Self {
            base,
            name: None,
            placemarks: Vec::new(),
        }
    }
}

impl KmlNode for FolderNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        ElementKind::Folder
    }

    fn finish(self: Box<Self>, _ctx: &mut KmlParseContext) -> Option<Offer> {
        tracing::trace!(
            folder = self.name.as_deref().unwrap_or(""),
            placemarks = self.placemarks.len(),
            "Folder finished"
        );
        Some(Offer::Folder(self.placemarks))
    }

    fn as_name_acceptor(&mut self) -> Option<&mut dyn AcceptsName> {
        Some(self)
    }

    fn as_placemark_acceptor(&mut self) -> Option<&mut dyn AcceptsPlacemark> {
        Some(self)
    }

    fn as_folder_acceptor(&mut self) -> Option<&mut dyn AcceptsFolder> {
        Some(self)
    }
}

impl AcceptsName for FolderNode {
    fn accept_name(&mut self, name: String) {
        self.name = Some(name);
    }
}

impl AcceptsPlacemark for FolderNode {
    fn accept_placemark(&mut self, placemark: Placemark) {
        self.placemarks.push(placemark);
    }
}

impl AcceptsFolder for FolderNode {
    fn accept_folder(&mut self, placemarks: Vec<Placemark>) {
        self.placemarks.extend(placemarks);
    }
}

#[derive(Debug)]
pub struct PlacemarkNode {
    base: NodeBase,
    name: Option<String>,
    description: Option<String>,
    address: Option<String>,
    geometry: Option<Geometry>,
}

impl PlacemarkNode {
    pub fn new(base: NodeBase) -> Self {
        Self {
            base,
            name: None,
            description: None,
            address: None,
            geometry: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// A placemark is worth keeping only once it has a geometry.
    pub fn is_interesting(&self) -> bool {
        self.geometry.is_some()
    }
}

impl KmlNode for PlacemarkNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        ElementKind::Placemark
    }

    fn finish(self: Box<Self>, ctx: &mut KmlParseContext) -> Option<Offer> {
        if !self.is_interesting() {
            ctx.report(Diagnostic::EmptyPlacemarkDiscarded { name: self.name });
            return None;
        }
        let geometry = self.geometry?;
        Some(Offer::Placemark(Placemark {
            id: self.base.id().map(str::to_string),
            name: self.name,
            description: self.description,
            address: self.address,
            geometry,
        }))
    }

    fn as_name_acceptor(&mut self) -> Option<&mut dyn AcceptsName> {
        Some(self)
    }

    fn as_description_acceptor(&mut self) -> Option<&mut dyn AcceptsDescription> {
        Some(self)
    }

    fn as_address_acceptor(&mut self) -> Option<&mut dyn AcceptsAddress> {
        Some(self)
    }

    fn as_geometry_acceptor(&mut self) -> Option<&mut dyn AcceptsGeometry> {
        Some(self)
    }
}

impl AcceptsName for PlacemarkNode {
    fn accept_name(&mut self, name: String) {
        self.name = Some(name);
    }
}

impl AcceptsDescription for PlacemarkNode {
    fn accept_description(&mut self, description: String) {
        self.description = Some(description);
    }
}

impl AcceptsAddress for PlacemarkNode {
    fn accept_address(&mut self, address: String) {
        self.address = Some(address);
    }
}

impl AcceptsGeometry for PlacemarkNode {
    fn accept_geometry(&mut self, geometry: Geometry) {
        self.geometry = Some(geometry);
    }
}
