//! Google encoded polylines at precision 5.
//!
//! Geometries are kept as `x = longitude`, `y = latitude` everywhere in the
//! workspace; the encoded form stores latitude first, as the format defines.

use geo::{Coord, LineString};
use thiserror::Error;

const SCALE: f64 = 1e5;
const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: i64 = 0x1f;
const CONTINUATION: i64 = 0x20;
const ASCII_OFFSET: i64 = 63;

/// Errors returned by [`decode_polyline`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// A byte outside the polyline alphabet.
    #[error("invalid polyline character at byte {position}")]
    InvalidCharacter {
        /// Byte offset into the input.
        position: usize,
    },
    /// The input ended inside a value or after a latitude.
    #[error("polyline ends in the middle of a coordinate")]
    Truncated,
    /// A value does not fit the accumulator.
    #[error("polyline value at byte {position} overflows")]
    Overflow {
        /// Byte offset where the value ends.
        position: usize,
    },
}

/// Encode `line` as a precision-5 polyline.
///
/// # Examples
/// ```
/// use geo::{Coord, LineString};
/// use pubcrawl_data::encode_polyline;
///
/// let line = LineString::from(vec![
///     Coord { x: -120.2, y: 38.5 },
///     Coord { x: -120.95, y: 40.7 },
///     Coord { x: -126.453, y: 43.252 },
/// ]);
/// assert_eq!(encode_polyline(&line), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
/// ```
#[must_use]
pub fn encode_polyline(line: &LineString<f64>) -> String {
    let mut encoded = String::new();
    let mut previous = (0_i64, 0_i64);
    for coord in line.coords() {
        let current = (quantise(coord.y), quantise(coord.x));
        encode_value(current.0 - previous.0, &mut encoded);
        encode_value(current.1 - previous.1, &mut encoded);
        previous = current;
    }
    encoded
}

/// Decode a precision-5 polyline into a line of `lon/lat` coordinates.
///
/// # Errors
///
/// Returns [`PolylineError`] when the input is malformed.
pub fn decode_polyline(encoded: &str) -> Result<LineString<f64>, PolylineError> {
    let mut bytes = encoded.bytes().enumerate().peekable();
    let mut coords = Vec::new();
    let (mut lat, mut lon) = (0_i64, 0_i64);
    while bytes.peek().is_some() {
        lat += decode_value(&mut bytes)?;
        lon += decode_value(&mut bytes)?;
        coords.push(Coord {
            x: dequantise(lon),
            y: dequantise(lat),
        });
    }
    Ok(LineString::from(coords))
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "coordinates are fixed to five decimal places"
)]
fn quantise(degrees: f64) -> i64 {
    (degrees * SCALE).round() as i64
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "coordinates are fixed to five decimal places"
)]
fn dequantise(value: i64) -> f64 {
    value as f64 / SCALE
}

fn encode_value(delta: i64, out: &mut String) {
    let mut value = (delta << 1) ^ (delta >> 63);
    loop {
        let chunk = value & CHUNK_MASK;
        value >>= CHUNK_BITS;
        let byte = if value == 0 { chunk } else { chunk | CONTINUATION };
        out.push(char::from(
            u8::try_from(byte + ASCII_OFFSET).unwrap_or(b'?'),
        ));
        if value == 0 {
            break;
        }
    }
}

fn decode_value(
    bytes: &mut impl Iterator<Item = (usize, u8)>,
) -> Result<i64, PolylineError> {
    let mut result = 0_i64;
    let mut shift = 0_u32;
    loop {
        let (position, byte) = bytes.next().ok_or(PolylineError::Truncated)?;
        let chunk = i64::from(byte) - ASCII_OFFSET;
        if !(0..64).contains(&chunk) {
            return Err(PolylineError::InvalidCharacter { position });
        }
        if shift > 60 {
            return Err(PolylineError::Overflow { position });
        }
        result |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;
        if chunk & CONTINUATION == 0 {
            return Ok((result >> 1) ^ -(result & 1));
        }
    }
}
