/*
 * node/mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! In-progress tree nodes.
//!
//! A node is created when its opening tag is seen, collects text and child
//! offers while it sits on the parse stack, and is finalized exactly once
//! when its closing tag is seen. Finalization consumes the node and yields
//! at most one [`Offer`] for its parent.
//!
//! Parents are referenced by [`NodeId`], a position in the stack of open
//! elements. The handle is only used to route the offer; it never owns the
//! parent.

mod container;
mod geometry;
mod leaf;

pub use container::{DocumentNode, FolderNode, KmlRoot, PlacemarkNode};
pub use geometry::{
    BoundaryNode, LineStringNode, LinearRingNode, MultiGeometryNode, PointNode, PolygonNode,
};
pub use leaf::{CoordinatesNode, GenericNode, TextNode};

use crate::context::KmlParseContext;
use crate::element::ElementKind;
use crate::event::Attributes;
use crate::offer::{
    AcceptsAddress, AcceptsCoordinateFailure, AcceptsCoordinates, AcceptsDescription,
    AcceptsDocument, AcceptsFolder, AcceptsGeometry, AcceptsInnerBoundary, AcceptsLinearRing,
    AcceptsName, AcceptsOuterBoundary, AcceptsPlacemark, AcceptsRawText, Offer,
};
use std::any::Any;
use std::fmt;

/// Handle to an open ancestor: its index in the parse stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// State shared by every node kind.
#[derive(Debug)]
pub struct NodeBase {
    /// Local tag name as written in the markup.
    tag: String,
    parent: Option<NodeId>,
    attributes: Attributes,
    text: Option<String>,
}

impl NodeBase {
    pub fn new(tag: impl Into<String>, parent: Option<NodeId>, attributes: Attributes) -> Self {
        Self {
            tag: tag.into(),
            parent,
            attributes,
            text: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The enclosing open element, or `None` for the root wrapper.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The `id` attribute, if any.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Text delivered so far, or `None` if no fragment has arrived.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn push_text(&mut self, fragment: &str) {
        self.text.get_or_insert_with(String::new).push_str(fragment);
    }

    /// Take the accumulated text, trimmed of surrounding whitespace.
    pub fn take_trimmed_text(&mut self) -> String {
        match self.text.take() {
            Some(text) => text.trim().to_string(),
            None => String::new(),
        }
    }
}

/// A node on the parse stack.
///
/// The `as_*` methods are capability queries: a container returns `Some`
/// for each kind of child it can incorporate. [`Offer::deliver`] uses them
/// to route a finished child without knowing the parent's concrete type.
pub trait KmlNode: Any + fmt::Debug {
    fn kind(&self) -> ElementKind;

    fn base(&self) -> &NodeBase;

    fn base_mut(&mut self) -> &mut NodeBase;

    /// Finalize the node, producing what it offers to its parent.
    ///
    /// Consuming `self` guarantees a node is finalized at most once.
    fn finish(self: Box<Self>, ctx: &mut KmlParseContext) -> Option<Offer>;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn as_name_acceptor(&mut self) -> Option<&mut dyn AcceptsName> {
        None
    }

    fn as_description_acceptor(&mut self) -> Option<&mut dyn AcceptsDescription> {
        None
    }

    fn as_address_acceptor(&mut self) -> Option<&mut dyn AcceptsAddress> {
        None
    }

    fn as_coordinates_acceptor(&mut self) -> Option<&mut dyn AcceptsCoordinates> {
        None
    }

    fn as_coordinate_failure_acceptor(&mut self) -> Option<&mut dyn AcceptsCoordinateFailure> {
        None
    }

    fn as_linear_ring_acceptor(&mut self) -> Option<&mut dyn AcceptsLinearRing> {
        None
    }

    fn as_outer_boundary_acceptor(&mut self) -> Option<&mut dyn AcceptsOuterBoundary> {
        None
    }

    fn as_inner_boundary_acceptor(&mut self) -> Option<&mut dyn AcceptsInnerBoundary> {
        None
    }

    fn as_geometry_acceptor(&mut self) -> Option<&mut dyn AcceptsGeometry> {
        None
    }

    fn as_placemark_acceptor(&mut self) -> Option<&mut dyn AcceptsPlacemark> {
        None
    }

    fn as_folder_acceptor(&mut self) -> Option<&mut dyn AcceptsFolder> {
        None
    }

    fn as_document_acceptor(&mut self) -> Option<&mut dyn AcceptsDocument> {
        None
    }

    fn as_raw_text_acceptor(&mut self) -> Option<&mut dyn AcceptsRawText> {
        None
    }
}

/// Implements the bookkeeping methods of [`KmlNode`] for a struct with a
/// `base: NodeBase` field.
macro_rules! node_base_impl {
    () => {
        fn base(&self) -> &$crate::node::NodeBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::node::NodeBase {
            &mut self.base
        }

        fn into_any(self: Box<Self>) -> Box<dyn std::any::Any> {
            self
        }
    };
}
pub(crate) use node_base_impl;
