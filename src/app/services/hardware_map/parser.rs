//! Hardware-map line parsing
//!
//! Each record line holds nine whitespace-separated fields:
//!
//! ```text
//! dro_source_id det_link det_slot det_crate det_id dro_host dro_card dro_slr dro_link
//! ```
//!
//! Extraction is sequential. The first missing or malformed token stops it and
//! leaves that field and every later one at its default value; the caller
//! decides whether an incomplete line is tolerated.

use crate::app::models::HwInfo;
use crate::constants::{COMMENT_MARKER, HW_FIELDS_PER_LINE};
use std::str::{FromStr, SplitWhitespace};

/// Classification of a raw hardware-map line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only
    Blank,
    /// First non-whitespace character is `#`
    Comment,
    /// Anything else, to be parsed as a record
    Record(&'a str),
}

/// Classify a line as blank, comment or record
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with(COMMENT_MARKER) {
        LineKind::Comment
    } else {
        LineKind::Record(line)
    }
}

/// Result of extracting one record line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Extracted record, marked as coming from a file
    pub info: HwInfo,

    /// Number of leading fields extracted successfully
    pub fields_parsed: usize,

    /// Number of tokens left over after the nine fields
    pub trailing_tokens: usize,
}

impl ParsedLine {
    /// All nine fields were extracted
    pub fn is_complete(&self) -> bool {
        self.fields_parsed == HW_FIELDS_PER_LINE
    }

    /// Name of the first field that could not be extracted
    pub fn first_missing_field(&self) -> Option<&'static str> {
        FIELD_NAMES.get(self.fields_parsed).copied()
    }
}

/// Field names in file order
pub const FIELD_NAMES: [&str; HW_FIELDS_PER_LINE] = [
    "dro_source_id",
    "det_link",
    "det_slot",
    "det_crate",
    "det_id",
    "dro_host",
    "dro_card",
    "dro_slr",
    "dro_link",
];

/// Parse one record line
pub fn parse_hardware_line(line: &str) -> ParsedLine {
    let mut info = HwInfo {
        from_file: true,
        ..HwInfo::default()
    };
    let mut tokens = line.split_whitespace();
    let mut fields_parsed = 0;

    // Stops at the first missing or malformed field
    let _ = extract_fields(&mut info, &mut tokens, &mut fields_parsed);

    let trailing_tokens = if fields_parsed == HW_FIELDS_PER_LINE {
        tokens.count()
    } else {
        0
    };

    ParsedLine {
        info,
        fields_parsed,
        trailing_tokens,
    }
}

fn extract_fields(
    info: &mut HwInfo,
    tokens: &mut SplitWhitespace<'_>,
    fields_parsed: &mut usize,
) -> Option<()> {
    info.dro_source_id = next_value(tokens)?;
    *fields_parsed += 1;
    info.det_link = next_value(tokens)?;
    *fields_parsed += 1;
    info.det_slot = next_value(tokens)?;
    *fields_parsed += 1;
    info.det_crate = next_value(tokens)?;
    *fields_parsed += 1;
    info.det_id = next_value(tokens)?;
    *fields_parsed += 1;
    info.dro_host = tokens.next()?.to_string();
    *fields_parsed += 1;
    info.dro_card = next_value(tokens)?;
    *fields_parsed += 1;
    info.dro_slr = next_value(tokens)?;
    *fields_parsed += 1;
    info.dro_link = next_value(tokens)?;
    *fields_parsed += 1;
    Some(())
}

fn next_value<T: FromStr>(tokens: &mut SplitWhitespace<'_>) -> Option<T> {
    tokens.next()?.parse().ok()
}
