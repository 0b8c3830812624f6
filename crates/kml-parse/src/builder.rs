/*
 * builder.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The parse-stack controller.
//!
//! [`KmlTreeBuilder`] consumes markup events and keeps a stack of open
//! nodes whose order mirrors the markup nesting. Opening a tag pushes a
//! node; closing it pops the node, finalizes it and delivers its offer to
//! the new stack top. A child is therefore always complete before any of
//! its parent's later siblings are built.

use crate::context::{Diagnostic, KmlParseContext};
use crate::element::{ElementKind, create_node};
use crate::entities::decode_raw_text;
use crate::error::{Result, StructuralViolation};
use crate::event::{Attributes, MarkupEvent};
use crate::node::{KmlNode, KmlRoot, NodeBase, NodeId};
use crate::options::ParseOptions;
use crate::types::Document;

/// Counters describing a finished or in-progress parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Elements pushed onto the stack.
    pub opened: usize,
    /// Elements popped and finalized.
    pub finalized: usize,
    /// Deepest stack seen.
    pub max_depth: usize,
}

/// Builds a [`Document`] from a stream of markup events.
///
/// # Example
///
/// ```rust
/// use kml_parse::{KmlParseContext, KmlTreeBuilder, ParseOptions};
/// use std::collections::HashMap;
///
/// let options = ParseOptions::default();
/// let mut ctx = KmlParseContext::new();
/// let mut builder = KmlTreeBuilder::new(&options, &mut ctx);
///
/// builder.open("kml", HashMap::new()).unwrap();
/// builder.open("Document", HashMap::new()).unwrap();
/// builder.open("name", HashMap::new()).unwrap();
/// builder.text("Trip").unwrap();
/// builder.close("name").unwrap();
/// builder.close("Document").unwrap();
/// builder.close("kml").unwrap();
///
/// let document = builder.finish().unwrap().unwrap();
/// assert_eq!(document.name.as_deref(), Some("Trip"));
/// ```
#[derive(Debug)]
pub struct KmlTreeBuilder<'ctx> {
    root_tag: String,
    ctx: &'ctx mut KmlParseContext,
    /// Open nodes, innermost last.
    stack: Vec<Box<dyn KmlNode>>,
    /// Set once the root element has been opened.
    root_seen: bool,
    document: Option<Document>,
    stats: ParseStats,
}

impl<'ctx> KmlTreeBuilder<'ctx> {
    pub fn new(options: &ParseOptions, ctx: &'ctx mut KmlParseContext) -> Self {
        ctx.set_recording(options.record_diagnostics);
        Self {
            root_tag: options.root_tag.clone(),
            ctx,
            stack: Vec::new(),
            root_seen: false,
            document: None,
            stats: ParseStats::default(),
        }
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    /// Dispatch a single event to the matching handler.
    pub fn process(&mut self, event: MarkupEvent) -> Result<()> {
        match event {
            MarkupEvent::Open { name, attributes } => self.open(&name, attributes),
            MarkupEvent::Close { name } => self.close(&name),
            MarkupEvent::Text(fragment) => self.text(&fragment),
            MarkupEvent::RawTextBlock(bytes) => self.raw_text_block(&bytes),
        }
    }

    /// Handle an opening tag.
    ///
    /// With an empty stack only the root tag is accepted and the root
    /// wrapper is built directly. Otherwise the registry builds the node
    /// with the current top as its parent.
    pub fn open(&mut self, tag: &str, attributes: Attributes) -> Result<()> {
        let node: Box<dyn KmlNode> = if self.stack.is_empty() {
            if self.root_seen {
                return Err(StructuralViolation::MultipleRoots {
                    found: tag.to_string(),
                }
                .into());
            }
            if !tag.eq_ignore_ascii_case(&self.root_tag) {
                return Err(StructuralViolation::UnexpectedRoot {
                    expected: self.root_tag.clone(),
                    found: tag.to_string(),
                }
                .into());
            }
            self.root_seen = true;
            Box::new(KmlRoot::new(NodeBase::new(tag, None, attributes)))
        } else {
            let parent = NodeId::new(self.stack.len() - 1);
            let kind = ElementKind::from_tag_name(tag);
            if !kind.is_supported() {
                self.ctx.report(Diagnostic::UnsupportedElement {
                    tag: tag.to_string(),
                });
            }
            create_node(kind, NodeBase::new(tag, Some(parent), attributes))
        };

        tracing::trace!(tag, depth = self.stack.len(), "open");
        self.stack.push(node);
        self.stats.opened += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.stack.len());
        Ok(())
    }

    /// Handle a closing tag: pop, finalize, offer to the parent.
    pub fn close(&mut self, tag: &str) -> Result<()> {
        let Some(node) = self.stack.pop() else {
            return Err(StructuralViolation::CloseWithoutOpen {
                found: tag.to_string(),
            }
            .into());
        };

        if !node.base().tag().eq_ignore_ascii_case(tag) {
            return Err(StructuralViolation::MismatchedClose {
                expected: node.base().tag().to_string(),
                found: tag.to_string(),
            }
            .into());
        }

        tracing::trace!(tag, depth = self.stack.len(), "close");
        self.stats.finalized += 1;

        if self.stack.is_empty() {
            return self.finish_root(node);
        }

        let parent_index = self.stack.len() - 1;
        debug_assert_eq!(node.base().parent(), Some(NodeId::new(parent_index)));

        let Some(offer) = node.finish(self.ctx) else {
            return Ok(());
        };
        let parent = &mut self.stack[parent_index];
        if let Err(rejected) = offer.deliver(parent.as_mut()) {
            self.ctx.report(Diagnostic::UnmatchedOffer {
                offered: rejected.label(),
                parent: parent.base().tag().to_string(),
            });
        }
        Ok(())
    }

    fn finish_root(&mut self, node: Box<dyn KmlNode>) -> Result<()> {
        let found = node.base().tag().to_string();
        if node.kind() != ElementKind::Kml {
            return Err(StructuralViolation::NonRootAtEnd { found }.into());
        }
        let root = node
            .into_any()
            .downcast::<KmlRoot>()
            .map_err(|_| StructuralViolation::NonRootAtEnd { found })?;
        self.document = root.into_document();
        Ok(())
    }

    /// Append a text fragment to the innermost open element.
    pub fn text(&mut self, fragment: &str) -> Result<()> {
        let node = self
            .stack
            .last_mut()
            .ok_or(StructuralViolation::TextOutsideRoot)?;
        node.base_mut().push_text(fragment);
        Ok(())
    }

    /// Handle an escaped text block.
    ///
    /// The decoded text goes to the innermost element only if it accepts
    /// raw text; otherwise it is ignored.
    pub fn raw_text_block(&mut self, bytes: &[u8]) -> Result<()> {
        let node = self
            .stack
            .last_mut()
            .ok_or(StructuralViolation::TextOutsideRoot)?;
        match node.as_raw_text_acceptor() {
            Some(acceptor) => acceptor.accept_raw_text(&decode_raw_text(bytes)),
            None => tracing::trace!(tag = node.base().tag(), "Ignoring raw text block"),
        }
        Ok(())
    }

    /// End of input.
    ///
    /// Returns the document accepted by the root wrapper, if any.
    ///
    /// # Errors
    ///
    /// Fails if elements are still open or no root element was seen.
    pub fn finish(self) -> Result<Option<Document>> {
        if let Some(open) = self.stack.last() {
            return Err(StructuralViolation::UnclosedElement {
                open: open.base().tag().to_string(),
            }
            .into());
        }
        if !self.root_seen {
            return Err(StructuralViolation::EmptyDocument.into());
        }
        tracing::debug!(
            opened = self.stats.opened,
            finalized = self.stats.finalized,
            max_depth = self.stats.max_depth,
            "Parse finished"
        );
        Ok(self.document)
    }
}

/// Replay `events` through a fresh builder.
pub fn build_from_events<I>(
    events: I,
    options: &ParseOptions,
    ctx: &mut KmlParseContext,
) -> Result<Option<Document>>
where
    I: IntoIterator<Item = MarkupEvent>,
{
    let mut builder = KmlTreeBuilder::new(options, ctx);
    for event in events {
        builder.process(event)?;
    }
    builder.finish()
}
