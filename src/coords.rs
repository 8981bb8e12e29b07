//! Decoding of map-opening links into coordinates.
//!
//! Listing pages link each venue to a map modal like
//! `/includes/ros/modal/mappe/index.asp?Latitudine=45.4671450&Longitudine=9.1979533&Nome_Location=Teatro+San+Babila`.
//! The latitude and longitude are always the first two query parameters, and
//! they are read by position rather than by key.

use crate::error::LinkError;
use crate::types::Coordinate;

/// Decodes the `href` of a map link into a [`Coordinate`].
pub fn decode_map_link(href: &str) -> Result<Coordinate, LinkError> {
    let href = href.trim();
    if href.is_empty() {
        return Err(LinkError::Absent);
    }

    let (_, query) = href.split_once('?').ok_or(LinkError::MissingQuery)?;

    // Empty tokens keep their position, so `?&Latitudine=..` fails on the first one.
    let params: Vec<&str> = query.split('&').collect();
    if params.len() < 2 {
        return Err(LinkError::TooFewParams(params.len()));
    }

    let lat = param_value(params[0])?;
    let lng = param_value(params[1])?;
    Ok(Coordinate::new(lat, lng))
}

fn param_value(token: &str) -> Result<f64, LinkError> {
    let value = match token.split_once('=') {
        Some((_, v)) if !v.trim().is_empty() => v.trim(),
        _ => return Err(LinkError::MissingValue(token.to_string())),
    };

    let number: f64 = value.parse().map_err(|_| LinkError::InvalidNumber {
        value: value.to_string(),
    })?;
    if !number.is_finite() {
        return Err(LinkError::NonFinite(value.to_string()));
    }
    Ok(number)
}
