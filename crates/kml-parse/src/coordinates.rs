/*
 * coordinates.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parsing of `<coordinates>` text.
//!
//! KML writes coordinates as whitespace-separated tuples of
//! `longitude,latitude,altitude`. All three components are required.

use crate::error::CoordinateError;
use crate::types::Coordinate;

/// Parse the accumulated text of a `<coordinates>` element.
///
/// Tuples are returned in source order. Empty or whitespace-only text yields
/// an empty list.
///
/// # Example
///
/// ```rust
/// use kml_parse::parse_coordinates;
///
/// let coords = parse_coordinates("-122.4,37.7,10.0 -122.5,37.8,0.0").unwrap();
/// assert_eq!(coords.len(), 2);
/// assert_eq!(coords[1].latitude, 37.8);
/// ```
///
/// # Errors
///
/// Returns [`CoordinateError`] if any tuple does not have exactly three
/// components or a component is not a finite number.
pub fn parse_coordinates(text: &str) -> Result<Vec<Coordinate>, CoordinateError> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, triple)| parse_triple(index, triple))
        .collect()
}

fn parse_triple(index: usize, triple: &str) -> Result<Coordinate, CoordinateError> {
    let components: Vec<&str> = triple.split(',').collect();
    let &[longitude, latitude, altitude] = components.as_slice() else {
        return Err(CoordinateError::WrongArity {
            index,
            triple: triple.to_string(),
            found: components.len(),
        });
    };

    let number = |component: &str| {
        let value = component
            .parse::<f64>()
            .map_err(|source| CoordinateError::InvalidNumber {
                index,
                triple: triple.to_string(),
                component: component.to_string(),
                source,
            })?;
        if !value.is_finite() {
            return Err(CoordinateError::NonFinite {
                index,
                triple: triple.to_string(),
                component: component.to_string(),
            });
        }
        Ok(value)
    };

    Ok(Coordinate {
        longitude: number(longitude)?,
        latitude: number(latitude)?,
        altitude: number(altitude)?,
    })
}
