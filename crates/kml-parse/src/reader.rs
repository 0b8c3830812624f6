/*
 * reader.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! quick-xml front end for the tree builder.

use crate::builder::KmlTreeBuilder;
use crate::context::KmlParseContext;
use crate::error::{KmlError, Result};
use crate::event::Attributes;
use crate::options::ParseOptions;
use crate::types::Document;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// Parse a KML document with default options.
///
/// # Example
///
/// ```rust
/// use kml_parse::{Geometry, parse_kml};
///
/// let document = parse_kml(r#"<kml xmlns="http://www.opengis.net/kml/2.2">
///   <Document>
///     <name>Landmarks</name>
///     <Placemark>
///       <name>Coit Tower</name>
///       <Point><coordinates>-122.4058,37.8024,0</coordinates></Point>
///     </Placemark>
///   </Document>
/// </kml>"#).unwrap();
///
/// assert_eq!(document.name.as_deref(), Some("Landmarks"));
/// assert!(matches!(document.placemarks[0].geometry, Geometry::Point(_)));
/// ```
///
/// # Errors
///
/// Returns an error if the XML is malformed, the element structure is
/// invalid, or the root contains no `<Document>`.
pub fn parse_kml(content: &str) -> Result<Document> {
    parse_kml_with_options(content, &ParseOptions::default())
}

/// Parse a KML document, discarding diagnostics.
pub fn parse_kml_with_options(content: &str, options: &ParseOptions) -> Result<Document> {
    let mut ctx = KmlParseContext::new();
    parse_kml_with_context(content, options, &mut ctx)
}

/// Parse a KML document, collecting diagnostics into `ctx`.
pub fn parse_kml_with_context(
    content: &str,
    options: &ParseOptions,
    ctx: &mut KmlParseContext,
) -> Result<Document> {
    let builder = KmlTreeBuilder::new(options, ctx);
    KmlReader::new(content, builder)
        .run()?
        .ok_or(KmlError::MissingDocument)
}

/// Read and parse a KML file.
pub fn parse_kml_file(
    path: impl AsRef<Path>,
    options: &ParseOptions,
    ctx: &mut KmlParseContext,
) -> Result<Document> {
    let content = std::fs::read_to_string(path)?;
    parse_kml_with_context(&content, options, ctx)
}

/// Drives a [`KmlTreeBuilder`] from quick-xml events.
struct KmlReader<'a, 'ctx> {
    reader: Reader<&'a [u8]>,
    builder: KmlTreeBuilder<'ctx>,
}

impl<'a, 'ctx> KmlReader<'a, 'ctx> {
    fn new(source: &'a str, builder: KmlTreeBuilder<'ctx>) -> Self {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;
        Self { reader, builder }
    }

    fn run(mut self) -> Result<Option<Document>> {
        loop {
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let (name, attributes) = self.read_start(&e)?;
                    self.builder.open(&name, attributes)?;
                }
                Ok(Event::End(e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    self.builder.close(&name)?;
                }
                Ok(Event::Empty(e)) => {
                    let (name, attributes) = self.read_start(&e)?;
                    self.builder.open(&name, attributes)?;
                    self.builder.close(&name)?;
                }
                Ok(Event::Text(e)) => {
                    let position = self.reader.buffer_position();
                    let text = e.unescape().map_err(|err| KmlError::XmlSyntax {
                        message: format!("Invalid text content: {}", err),
                        position: Some(position),
                    })?;
                    // Whitespace around the root element is not content.
                    if self.builder.depth() == 0 && text.trim().is_empty() {
                        continue;
                    }
                    self.builder.text(&text)?;
                }
                Ok(Event::CData(e)) => {
                    self.builder.raw_text_block(&e)?;
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(KmlError::XmlSyntax {
                        message: e.to_string(),
                        position: Some(self.reader.error_position()),
                    });
                }
            }
        }

        self.builder.finish()
    }

    /// Local tag name and attributes of a start tag. Namespace prefixes are
    /// dropped from both.
    fn read_start(&self, e: &BytesStart<'_>) -> Result<(String, Attributes)> {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

        let mut attributes = Attributes::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| KmlError::XmlSyntax {
                message: format!("Attribute error: {}", err),
                position: Some(self.reader.buffer_position()),
            })?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|err| KmlError::XmlSyntax {
                message: format!("Invalid attribute value: {}", err),
                position: Some(self.reader.buffer_position()),
            })?;
            attributes.insert(key, value.into_owned());
        }

        Ok((name, attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Diagnostic;
    use crate::error::StructuralViolation;
    use crate::types::{Coordinate, Geometry};

    #[test]
    fn test_parse_point_placemark() {
        let document = parse_kml(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document id="root-doc">
    <Placemark id="pm1">
      <name>Point A</name>
      <Point><coordinates>1.0,2.0,0.0</coordinates></Point>
    </Placemark>
  </Document>
</kml>
"#,
        )
        .unwrap();

        assert_eq!(document.id.as_deref(), Some("root-doc"));
        assert_eq!(document.placemarks.len(), 1);
        let placemark = &document.placemarks[0];
        assert_eq!(placemark.id.as_deref(), Some("pm1"));
        assert_eq!(placemark.name.as_deref(), Some("Point A"));
        match &placemark.geometry {
            Geometry::Point(point) => {
                assert_eq!(point.coordinate, Coordinate::new(1.0, 2.0, 0.0));
            }
            other => panic!("expected a point, got {:?}", other),
        }
    }

    #[test]
    fn test_namespace_prefixes_are_stripped() {
        let document = parse_kml(
            r#"<kml:kml xmlns:kml="http://www.opengis.net/kml/2.2">
  <kml:Document>
    <kml:Placemark>
      <kml:Point><kml:coordinates>3,4,5</kml:coordinates></kml:Point>
    </kml:Placemark>
  </kml:Document>
</kml:kml>"#,
        )
        .unwrap();
        assert_eq!(document.placemarks.len(), 1);
    }

    #[test]
    fn test_cdata_description_is_decoded() {
        let document = parse_kml(
            r#"<kml><Document><Placemark>
  <description><![CDATA[<b>Open</b>&#160;late &#169; city]]></description>
  <Point><coordinates>0,0,0</coordinates></Point>
</Placemark></Document></kml>"#,
        )
        .unwrap();
        assert_eq!(
            document.placemarks[0].description.as_deref(),
            Some("<b>Open</b> late \u{a9} city")
        );
    }

    #[test]
    fn test_escaped_text_is_unescaped() {
        let document = parse_kml(
            r#"<kml><Document><name>Fish &amp; Chips</name></Document></kml>"#,
        )
        .unwrap();
        assert_eq!(document.name.as_deref(), Some("Fish & Chips"));
    }

    #[test]
    fn test_self_closing_elements() {
        let mut ctx = KmlParseContext::new();
        let document = parse_kml_with_context(
            r#"<kml><Document><Placemark><Point/></Placemark><Snippet/></Document></kml>"#,
            &ParseOptions::default(),
            &mut ctx,
        )
        .unwrap();
        assert!(document.placemarks.is_empty());
        assert!(
            ctx.diagnostics()
                .iter()
                .any(|d| matches!(d, Diagnostic::UnsupportedElement { tag } if tag == "Snippet"))
        );
    }

    #[test]
    fn test_wrong_root_element() {
        let result = parse_kml("<gpx><trk/></gpx>");
        assert!(matches!(
            result,
            Err(KmlError::Structural(StructuralViolation::UnexpectedRoot { .. }))
        ));
    }

    #[test]
    fn test_missing_document() {
        let result = parse_kml("<kml></kml>");
        assert!(matches!(result, Err(KmlError::MissingDocument)));
    }

    #[test]
    fn test_empty_input() {
        let result = parse_kml("  \n");
        assert!(matches!(
            result,
            Err(KmlError::Structural(StructuralViolation::EmptyDocument))
        ));
    }

    #[test]
    fn test_text_outside_root() {
        let result = parse_kml("stray <kml/>");
        assert!(matches!(
            result,
            Err(KmlError::Structural(StructuralViolation::TextOutsideRoot))
        ));
    }

    #[test]
    fn test_unclosed_root() {
        // quick-xml may flag the missing end tag itself before the builder does.
        let result = parse_kml("<kml><Document>");
        assert!(
            matches!(
                result,
                Err(KmlError::Structural(
                    StructuralViolation::UnclosedElement { .. }
                )) | Err(KmlError::XmlSyntax { .. })
            ),
            "got {:?}",
            result
        );
    }

    #[test]
    fn test_xml_syntax_error() {
        let result = parse_kml("<kml><Document></kml>");
        assert!(
            matches!(result, Err(KmlError::XmlSyntax { .. })),
            "got {:?}",
            result
        );
    }
}
