//! Line codec for the boat data file.
//!
//! One record is one line of 5 comma-separated fields:
//! `name,length,place,location,amount_owed`. Names must not contain commas;
//! the format has no quoting or escaping.

use thiserror::Error;

use crate::boat::{Boat, Place, PlaceKind, MAX_TAG_CHARS};

/// Number of comma-separated fields in a record line.
const FIELD_COUNT: usize = 5;

/// Why a record line failed to decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The line did not split into exactly 5 fields.
    #[error("expected 5 comma-separated fields, found {found}")]
    FieldCount {
        /// How many fields the line actually had.
        found: usize,
    },

    /// The boat name field was empty.
    #[error("boat name is empty")]
    EmptyName,

    /// A numeric field did not parse as a number.
    #[error("invalid numeric field '{value}'")]
    InvalidNumber {
        /// The offending field text.
        value: String,
    },
}

/// Decode one record line into a [`Boat`].
///
/// The place name is matched case-insensitively and falls back to
/// [`PlaceKind::Unknown`] rather than failing; the location field is then
/// reinterpreted according to the resolved kind. Only the field shape itself
/// is strict: a wrong field count, an empty name, or an unparseable number
/// fails the whole line.
///
/// # Errors
///
/// Returns a [`DecodeError`] describing the first problem found.
pub fn decode_line(line: &str) -> Result<Boat, DecodeError> {
    let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(DecodeError::FieldCount {
            found: fields.len(),
        });
    }

    let name = fields[0];
    if name.is_empty() {
        return Err(DecodeError::EmptyName);
    }

    let length: f64 = fields[1]
        .parse()
        .map_err(|_| DecodeError::InvalidNumber {
            value: fields[1].to_string(),
        })?;

    let detail = fields[3];
    let place = match PlaceKind::from_name(fields[2]) {
        PlaceKind::Slip => Place::Slip(lenient_int(detail)),
        PlaceKind::Land => Place::Land(detail.chars().next().unwrap_or('?')),
        PlaceKind::Trailor => Place::Trailor(detail.chars().take(MAX_TAG_CHARS).collect()),
        PlaceKind::Storage => Place::Storage(lenient_int(detail)),
        PlaceKind::Unknown => Place::Unknown,
    };

    let amount_owed: f64 = fields[4]
        .parse()
        .map_err(|_| DecodeError::InvalidNumber {
            value: fields[4].to_string(),
        })?;

    Ok(Boat::new(name, length, place, amount_owed))
}

/// Encode a [`Boat`] as one record line (no trailing newline).
///
/// Length renders with no decimal places, the balance with two, and the
/// place kind by its canonical lowercase name. An unknown place has no
/// detail, leaving that field empty.
#[must_use]
pub fn encode_line(boat: &Boat) -> String {
    format!(
        "{},{:.0},{},{},{:.2}",
        boat.name,
        boat.length,
        boat.place.kind(),
        boat.place.detail(),
        boat.amount_owed
    )
}

/// Integer parse with `atoi` semantics: read an optional sign and leading
/// digits, and yield 0 when there is nothing numeric to read.
fn lenient_int(s: &str) -> i32 {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);
    s[..end].parse().unwrap_or(0)
}
