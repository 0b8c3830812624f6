//! Event-level scenarios for the tree builder.
//!
//! These feed hand-written markup events straight into the builder, without
//! going through the XML reader.

use kml_parse::{
    Coordinate, Diagnostic, Document, Geometry, KmlError, KmlParseContext, KmlTreeBuilder,
    MarkupEvent as E, ParseOptions, StructuralViolation, build_from_events, parse_coordinates,
};

fn build(events: Vec<E>) -> (kml_parse::Result<Option<Document>>, KmlParseContext) {
    let mut ctx = KmlParseContext::new();
    let result = build_from_events(events, &ParseOptions::default(), &mut ctx);
    (result, ctx)
}

fn document(events: Vec<E>) -> Document {
    let (result, _) = build(events);
    result
        .expect("parse should succeed")
        .expect("root should hold a document")
}

fn coordinates_element(text: &str) -> Vec<E> {
    vec![E::open("coordinates"), E::text(text), E::close("coordinates")]
}

fn ring(boundary: &str, text: &str) -> Vec<E> {
    let mut events = vec![E::open(boundary), E::open("LinearRing")];
    events.extend(coordinates_element(text));
    events.extend([E::close("LinearRing"), E::close(boundary)]);
    events
}

fn in_document(body: Vec<E>) -> Vec<E> {
    let mut events = vec![E::open("kml"), E::open("Document")];
    events.extend(body);
    events.extend([E::close("Document"), E::close("kml")]);
    events
}

fn placemark(name: &str, geometry: Vec<E>) -> Vec<E> {
    let mut events = vec![E::open("Placemark"), E::open("name"), E::text(name), E::close("name")];
    events.extend(geometry);
    events.push(E::close("Placemark"));
    events
}

fn point(text: &str) -> Vec<E> {
    let mut events = vec![E::open("Point")];
    events.extend(coordinates_element(text));
    events.push(E::close("Point"));
    events
}

#[test]
fn test_minimal_valid_document() {
    let events = vec![
        E::open("kml"),
        E::open("Document"),
        E::open("Placemark"),
        E::open("Point"),
        E::open("coordinates"),
        E::text("1.0,2.0,0.0"),
        E::close("coordinates"),
        E::close("Point"),
        E::close("Placemark"),
        E::close("Document"),
        E::close("kml"),
    ];

    let document = document(events);
    assert_eq!(document.placemarks.len(), 1);
    assert_eq!(
        document.placemarks[0].geometry,
        Geometry::Point(kml_parse::Point {
            coordinate: Coordinate::new(1.0, 2.0, 0.0)
        })
    );
}

#[test]
fn test_malformed_root() {
    let (result, ctx) = build(vec![E::open("foo"), E::close("foo")]);
    match result {
        Err(KmlError::Structural(StructuralViolation::UnexpectedRoot { expected, found })) => {
            assert_eq!(expected, "kml");
            assert_eq!(found, "foo");
        }
        other => panic!("expected an unexpected-root violation, got {:?}", other),
    }
    assert!(!ctx.has_diagnostics());
}

#[test]
fn test_polygon_with_one_inner_ring() {
    let mut geometry = vec![E::open("Polygon")];
    geometry.extend(ring("outerBoundaryIs", "0,0,0 4,0,0 4,4,0 0,0,0"));
    geometry.extend(ring("innerBoundaryIs", "1,1,0 2,1,0 2,2,0 1,1,0"));
    geometry.push(E::close("Polygon"));

    let document = document(in_document(placemark("Field", geometry)));
    let Geometry::Polygon(polygon) = &document.placemarks[0].geometry else {
        panic!("expected a polygon");
    };
    assert_eq!(polygon.outer.coordinates.len(), 4);
    assert!(polygon.outer.is_closed());
    assert_eq!(polygon.inner.len(), 1);
    assert_eq!(polygon.inner[0].coordinates[1], Coordinate::new(2.0, 1.0, 0.0));
}

#[test]
fn test_order_preservation() {
    let mut body = placemark("P1", point("1,1,0"));
    body.extend(placemark("P2", point("2,2,0")));
    body.extend(placemark("P3", point("3,3,0")));

    let names: Vec<String> = document(in_document(body))
        .placemarks
        .into_iter()
        .filter_map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["P1", "P2", "P3"]);
}

#[test]
fn test_placemark_without_geometry_is_discarded() {
    let mut body = vec![
        E::open("Placemark"),
        E::open("name"),
        E::text("Just words"),
        E::close("name"),
        E::open("description"),
        E::text("Nothing to map"),
        E::close("description"),
        E::close("Placemark"),
    ];
    body.extend(placemark("Kept", point("0,0,0")));

    let (result, ctx) = build(in_document(body));
    let document = result.unwrap().unwrap();
    assert_eq!(document.placemarks.len(), 1);
    assert_eq!(document.placemarks[0].name.as_deref(), Some("Kept"));
    assert_eq!(
        ctx.diagnostics(),
        &[Diagnostic::EmptyPlacemarkDiscarded {
            name: Some("Just words".to_string())
        }]
    );
}

#[test]
fn test_unsupported_element_does_not_disturb_siblings() {
    let mut geometry = vec![E::open("ExtendedData"), E::open("Data")];
    geometry.extend([E::text("ignored"), E::close("Data"), E::close("ExtendedData")]);
    geometry.extend(point("5,6,7"));
    let mut body = placemark("Tagged", geometry);
    body.extend(placemark("Neighbor", point("8,9,10")));

    let (result, ctx) = build(in_document(body));
    let document = result.unwrap().unwrap();
    assert_eq!(document.placemarks.len(), 2);
    assert_eq!(
        document.placemarks[0].geometry,
        Geometry::Point(kml_parse::Point {
            coordinate: Coordinate::new(5.0, 6.0, 7.0)
        })
    );
    let unsupported: Vec<&str> = ctx
        .diagnostics()
        .iter()
        .filter_map(|d| match d {
            Diagnostic::UnsupportedElement { tag } => Some(tag.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(unsupported, vec!["ExtendedData", "Data"]);
}

#[test]
fn test_coordinate_round_trip() {
    let coordinates = parse_coordinates("-122.4,37.7,10.0 -122.5,37.8,0.0").unwrap();
    assert_eq!(
        coordinates,
        vec![
            Coordinate::new(-122.4, 37.7, 10.0),
            Coordinate::new(-122.5, 37.8, 0.0),
        ]
    );
}

#[test]
fn test_stack_empties_only_at_the_end() {
    let events = in_document(placemark("Deep", point("1,2,3")));
    let total = events.len();

    let mut ctx = KmlParseContext::new();
    let mut builder = KmlTreeBuilder::new(&ParseOptions::default(), &mut ctx);
    for (i, event) in events.into_iter().enumerate() {
        builder.process(event).unwrap();
        if i + 1 < total {
            assert!(builder.depth() > 0, "stack emptied early at event {}", i);
        }
    }
    assert_eq!(builder.depth(), 0);

    let stats = builder.stats();
    assert_eq!(stats.opened, stats.finalized);
    let document = builder.finish().unwrap().unwrap();
    assert_eq!(document.placemarks.len(), 1);
}

#[test]
fn test_malformed_coordinates_only_lose_their_geometry() {
    let mut body = placemark("Bad", point("1.0,abc,0"));
    body.extend(placemark("Good", point("1,2,3")));

    let (result, ctx) = build(in_document(body));
    let document = result.unwrap().unwrap();
    assert_eq!(document.placemarks.len(), 1);
    assert_eq!(document.placemarks[0].name.as_deref(), Some("Good"));
    assert!(
        ctx.diagnostics()
            .iter()
            .any(|d| matches!(d, Diagnostic::CoordinateMalformed { .. }))
    );
}

#[test]
fn test_polygon_with_empty_ring_is_discarded() {
    let geometry = vec![
        E::open("Polygon"),
        E::open("outerBoundaryIs"),
        E::open("LinearRing"),
        E::close("LinearRing"),
        E::close("outerBoundaryIs"),
        E::close("Polygon"),
    ];
    let (result, ctx) = build(in_document(placemark("Hollow", geometry)));
    let document = result.unwrap().unwrap();
    assert!(document.placemarks.is_empty());
    assert!(ctx.diagnostics().contains(&Diagnostic::EmptyPlacemarkDiscarded {
        name: Some("Hollow".to_string())
    }));
}

#[test]
fn test_non_finite_coordinates_lose_their_geometry() {
    let (result, ctx) = build(in_document(placemark("Nowhere", point("inf,NaN,0"))));
    assert!(result.unwrap().unwrap().placemarks.is_empty());
    assert!(ctx.diagnostics().iter().any(|d| matches!(
        d,
        Diagnostic::CoordinateMalformed {
            error: kml_parse::CoordinateError::NonFinite { .. }
        }
    )));
}

#[test]
fn test_events_after_root_are_rejected() {
    let mut events = in_document(Vec::new());
    events.push(E::open("kml"));

    let (result, _) = build(events);
    assert!(matches!(
        result,
        Err(KmlError::Structural(StructuralViolation::MultipleRoots { .. }))
    ));
}
