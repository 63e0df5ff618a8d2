//! Parsing and defaulting of stamp request parameters.
//!
//! Callers that take stamp parameters as loosely-typed text fields (web
//! forms, CLI flags) funnel them through here; everything downstream of
//! this module works with validated types only.

use crate::colour::{colours, Colour};
use crate::error::StampError;
use crate::page::Rotation;
use crate::stamp::StampSpec;
use crate::units::Pt;
use std::collections::HashMap;

/// Default stamp size when none is requested, in points
pub const DEFAULT_STAMP_SIZE: (Pt, Pt) = (Pt(80.0), Pt(80.0));
/// Default element order key for [StampRequest::from_fields]
pub const DEFAULT_ELEMENT_ORDER: &str = "h1,h2,h3";

/// Which pages of a document to stamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page, in document order
    All,
    /// Specific 0-based page indices, in the given order
    Pages(Vec<usize>),
}

impl PageSelection {
    /// Parse a page selection: `"-1"` selects every page, anything else is
    /// read as a comma-separated list of 0-based indices. Entries that are
    /// not plain digits are dropped, so a selection can come out empty and
    /// stamp nothing.
    pub fn parse(value: &str) -> PageSelection {
        if value.trim() == "-1" {
            return PageSelection::All;
        }
        PageSelection::Pages(
            value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty() && entry.chars().all(|c| c.is_ascii_digit()))
                .filter_map(|entry| entry.parse().ok())
                .collect(),
        )
    }

    /// The concrete page indices this selection names in a document with
    /// `page_count` pages, failing on any out-of-range index
    pub fn resolve(&self, page_count: usize) -> Result<Vec<usize>, StampError> {
        match self {
            PageSelection::All => Ok((0..page_count).collect()),
            PageSelection::Pages(indices) => {
                for &index in indices {
                    if index >= page_count {
                        return Err(StampError::PageOutOfRange {
                            index,
                            count: page_count,
                        });
                    }
                }
                Ok(indices.clone())
            }
        }
    }
}

/// Parse a stamp size given as `"width,height"` in points. A missing value,
/// or one without a comma, falls back to [DEFAULT_STAMP_SIZE]; a value with
/// a comma must parse to two positive numbers.
pub fn parse_size(value: Option<&str>) -> Result<(Pt, Pt), StampError> {
    let value = match value {
        Some(v) if v.contains(',') => v,
        _ => return Ok(DEFAULT_STAMP_SIZE),
    };

    let invalid = || StampError::InvalidSize {
        value: value.to_string(),
    };
    let (w, h) = value.split_once(',').ok_or_else(invalid)?;
    let w: f32 = w.trim().parse().map_err(|_| invalid())?;
    let h: f32 = h.trim().parse().map_err(|_| invalid())?;
    if !(w > 0.0 && h > 0.0) {
        return Err(invalid());
    }
    Ok((Pt(w), Pt(h)))
}

/// Parse a rotation given in degrees as text; only 0, 90, 180, and 270 are
/// accepted
pub fn parse_rotation(value: &str) -> Result<Rotation, StampError> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(Rotation::from_degrees)
        .ok_or_else(|| StampError::InvalidRotation {
            value: value.to_string(),
        })
}

/// Resolve a palette colour name, failing on names outside the palette
pub fn parse_colour(name: &str) -> Result<Colour, StampError> {
    colours::named(name).ok_or_else(|| StampError::UnknownColour {
        name: name.to_string(),
    })
}

/// A fully parsed and defaulted stamping request
#[derive(Debug, Clone, PartialEq)]
pub struct StampRequest {
    pub pages: PageSelection,
    pub size: (Pt, Pt),
    pub spec: StampSpec,
}

impl StampRequest {
    /// Build a request from loosely-typed text fields, applying defaults
    /// for everything absent: pages `"0"`, size 80x80, colour black, element
    /// order `"h1,h2,h3"`, no rotation, no frame.
    ///
    /// The stamp text comes from the `h1`/`h2`/`h3` fields, ordered and
    /// filtered by the `stamp_elements` order key; a request whose resolved
    /// text is blank is rejected.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<StampRequest, StampError> {
        let field = |key: &str| fields.get(key).map(String::as_str);

        let pages = PageSelection::parse(field("pages").unwrap_or("0"));
        let size = parse_size(field("size"))?;
        let colour = parse_colour(field("color").unwrap_or("Black"))?;
        let rotation = parse_rotation(field("rotation").unwrap_or("0"))?;
        let frame = field("frame")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let order = field("stamp_elements").unwrap_or(DEFAULT_ELEMENT_ORDER);
        let mut elements = HashMap::new();
        for key in order.split(',').map(str::trim) {
            if let Some(value) = field(key) {
                elements.insert(key.to_string(), value.to_string());
            }
        }

        let spec = StampSpec::from_elements(&elements, order, colour, rotation, frame)?;
        Ok(StampRequest { pages, size, spec })
    }
}
