//! Core inventory types for moorage.
//!
//! This module defines the fundamental data structures for representing
//! boats and the marina locations they occupy.

use std::fmt;

/// Maximum length of a boat name, in bytes. Longer names are truncated.
pub const MAX_NAME_BYTES: usize = 127;

/// Maximum length of a trailer license tag, in characters.
pub const MAX_TAG_CHARS: usize = 9;

/// The category of storage a boat occupies.
///
/// Each kind selects a distinct billing rate and a distinct location-detail
/// shape. `Unknown` exists only as a lenient parse fallback for records whose
/// place field matches none of the canonical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceKind {
    /// A numbered slip in the water.
    Slip,
    /// A lettered bay on land.
    Land,
    /// A boat kept on a trailer, identified by license tag.
    /// (The `trailor` spelling matches the persisted file format.)
    Trailor,
    /// A numbered space in the storage building.
    Storage,
    /// Unrecognized place; accepted on decode, billed at zero.
    Unknown,
}

impl PlaceKind {
    /// Resolve a place name case-insensitively, falling back to `Unknown`
    /// for anything unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("slip") {
            Self::Slip
        } else if name.eq_ignore_ascii_case("land") {
            Self::Land
        } else if name.eq_ignore_ascii_case("trailor") {
            Self::Trailor
        } else if name.eq_ignore_ascii_case("storage") {
            Self::Storage
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for PlaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slip => write!(f, "slip"),
            Self::Land => write!(f, "land"),
            Self::Trailor => write!(f, "trailor"),
            Self::Storage => write!(f, "storage"),
            Self::Unknown => write!(f, "no_place"),
        }
    }
}

/// Where a boat sits, with the detail shape fixed by the variant.
///
/// This replaces a tag + untyped-detail pair: the active case is statically
/// known wherever it is read, so the kind and its detail cannot drift apart.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    /// Slip number, expected range 1-85 (not enforced).
    Slip(i32),
    /// Bay letter, expected A-Z (not enforced).
    Land(char),
    /// Trailer license tag, at most [`MAX_TAG_CHARS`] characters.
    Trailor(String),
    /// Storage space number, expected range 1-50 (not enforced).
    Storage(i32),
    /// No location detail.
    Unknown,
}

impl Place {
    /// The kind of this place.
    #[must_use]
    pub fn kind(&self) -> PlaceKind {
        match self {
            Self::Slip(_) => PlaceKind::Slip,
            Self::Land(_) => PlaceKind::Land,
            Self::Trailor(_) => PlaceKind::Trailor,
            Self::Storage(_) => PlaceKind::Storage,
            Self::Unknown => PlaceKind::Unknown,
        }
    }

    /// The location detail in its wire form (empty for `Unknown`).
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Slip(n) | Self::Storage(n) => n.to_string(),
            Self::Land(bay) => bay.to_string(),
            Self::Trailor(tag) => tag.clone(),
            Self::Unknown => String::new(),
        }
    }
}

/// One boat in the marina's inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct Boat {
    /// The boat's name, the (case-insensitive) business key.
    pub name: String,
    /// Length in feet, used only for billing.
    pub length: f64,
    /// Where the boat is kept.
    pub place: Place,
    /// Outstanding balance in dollars.
    pub amount_owed: f64,
}

impl Boat {
    /// Create a new boat, truncating the name to [`MAX_NAME_BYTES`].
    #[must_use]
    pub fn new(name: impl Into<String>, length: f64, place: Place, amount_owed: f64) -> Self {
        let mut name = name.into();
        if name.len() > MAX_NAME_BYTES {
            let mut cut = MAX_NAME_BYTES;
            while !name.is_char_boundary(cut) {
                cut -= 1;
            }
            name.truncate(cut);
        }
        Self {
            name,
            length,
            place,
            amount_owed,
        }
    }

    /// Case-insensitive name comparison, shared by every lookup path.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// The key the registry sorts on.
    #[must_use]
    pub fn sort_key(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

/// The fixed-width inventory summary line.
impl fmt::Display for Boat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<20} {:>3.0}' ", self.name, self.length)?;
        let kind = self.place.kind().to_string();
        match &self.place {
            Place::Slip(n) | Place::Storage(n) => write!(f, "{kind:>7}   # {n:>2}")?,
            Place::Land(bay) => write!(f, "{kind:>7}      {bay}")?,
            Place::Trailor(tag) => write!(f, "{kind:>7} {tag:>6}")?,
            Place::Unknown => write!(f, "{kind:>7}")?,
        }
        write!(f, "   Owes ${:>7.2}", self.amount_owed)
    }
}
