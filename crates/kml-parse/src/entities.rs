/*
 * entities.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Decoding of raw text blocks.
//!
//! Only `&#160;` and `&#169;` are substituted. Any other reference is left
//! as written.

const NUMERIC_REFERENCES: [(&str, &str); 2] = [("&#160;", " "), ("&#169;", "\u{a9}")];

/// Decode a raw text block to a string.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn decode_raw_text(bytes: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(bytes).into_owned();
    for (reference, replacement) in NUMERIC_REFERENCES {
        if text.contains(reference) {
            text = text.replace(reference, replacement);
        }
    }
    text
}
