/*
 * node/leaf.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Leaf nodes: text elements, `<coordinates>`, and the generic fallback.

use super::{KmlNode, NodeBase, node_base_impl};
use crate::context::{Diagnostic, KmlParseContext};
use crate::coordinates::parse_coordinates;
use crate::element::ElementKind;
use crate::offer::{AcceptsRawText, Offer};

/// `<name>`, `<description>` or `<address>`.
#[derive(Debug)]
pub struct TextNode {
    kind: ElementKind,
    base: NodeBase,
}

impl TextNode {
    pub fn new(kind: ElementKind, base: NodeBase) -> Self {
        debug_assert!(matches!(
            kind,
            ElementKind::Name | ElementKind::Description | ElementKind::Address
        ));
        Self { kind, base }
    }
}

impl KmlNode for TextNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn finish(mut self: Box<Self>, _ctx: &mut KmlParseContext) -> Option<Offer> {
        let text = self.base.take_trimmed_text();
        match self.kind {
            ElementKind::Name => Some(Offer::Name(text)),
            ElementKind::Description => Some(Offer::Description(text)),
            ElementKind::Address => Some(Offer::Address(text)),
            _ => None,
        }
    }

    fn as_raw_text_acceptor(&mut self) -> Option<&mut dyn AcceptsRawText> {
        Some(self)
    }
}

impl AcceptsRawText for TextNode {
    fn accept_raw_text(&mut self, text: &str) {
        self.base.push_text(text);
    }
}

/// `<coordinates>`: parses its text when it closes.
#[derive(Debug)]
pub struct CoordinatesNode {
    base: NodeBase,
}

impl CoordinatesNode {
    pub fn new(base: NodeBase) -> Self {
        Self { base }
    }
}

impl KmlNode for CoordinatesNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        ElementKind::Coordinates
    }

    fn finish(self: Box<Self>, ctx: &mut KmlParseContext) -> Option<Offer> {
        let text = self.base.text().unwrap_or_default();
        match parse_coordinates(text) {
            Ok(coordinates) => Some(Offer::Coordinates(coordinates)),
            Err(error) => {
                ctx.report(Diagnostic::CoordinateMalformed {
                    error: error.clone(),
                });
                Some(Offer::CoordinateFailure(error))
            }
        }
    }
}

/// Fallback for unrecognized elements.
///
/// Captures attributes and text like any other node but has no
/// capabilities and offers nothing.
#[derive(Debug)]
pub struct GenericNode {
    base: NodeBase,
}

impl GenericNode {
    pub fn new(base: NodeBase) -> Self {
        Self { base }
    }
}

impl KmlNode for GenericNode {
    node_base_impl!();

    fn kind(&self) -> ElementKind {
        ElementKind::Unsupported
    }

    fn finish(self: Box<Self>, _ctx: &mut KmlParseContext) -> Option<Offer> {
        None
    }
}
