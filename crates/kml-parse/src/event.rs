/*
 * event.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Markup events consumed by the tree builder.

use std::collections::HashMap;

/// Attribute name to value. Order is not preserved.
pub type Attributes = HashMap<String, String>;

/// One event from a markup tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    /// An opening tag.
    Open { name: String, attributes: Attributes },
    /// A closing tag.
    Close { name: String },
    /// A fragment of character data.
    Text(String),
    /// An escaped block (CDATA) delivered as raw bytes.
    RawTextBlock(Vec<u8>),
}

impl MarkupEvent {
    pub fn open(name: impl Into<String>) -> Self {
        MarkupEvent::Open {
            name: name.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn open_with(name: impl Into<String>, attributes: &[(&str, &str)]) -> Self {
        MarkupEvent::Open {
            name: name.into(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn close(name: impl Into<String>) -> Self {
        MarkupEvent::Close { name: name.into() }
    }

    pub fn text(fragment: impl Into<String>) -> Self {
        MarkupEvent::Text(fragment.into())
    }

    pub fn raw(bytes: impl Into<Vec<u8>>) -> Self {
        MarkupEvent::RawTextBlock(bytes.into())
    }
}
