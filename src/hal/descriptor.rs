//! Parsing of scan-element descriptor text.
//!
//! A channel is described by two small strings: its position in the
//! interleaved stream (`"3"`) and its type (`"le:u16/32>>16"`), where the type
//! reads as `<endian>:<sign><bits>/<frame bits>>><shift>`.

use super::error::LayoutError;
use super::types::{ChannelFormat, ScanElement};

/// Widest container word the extractor can read into a native integer
const MAX_FRAME_BITS: u32 = 64;

/// Parse the stream index, ignoring surrounding whitespace
pub fn parse_index(index_text: &str) -> Result<u32, LayoutError> {
    index_text
        .trim()
        .parse::<u32>()
        .map_err(|_| LayoutError::MalformedIndex(index_text.to_string()))
}

/// Parse a type descriptor such as `be:s24/32>>8`
pub fn parse_type(type_text: &str) -> Result<ChannelFormat, LayoutError> {
    let malformed = || LayoutError::MalformedTypeDescriptor(type_text.to_string());

    let (endian, rest) = type_text.split_once(':').ok_or_else(malformed)?;
    let is_little_endian = match endian {
        "le" => true,
        "be" => false,
        other => return Err(LayoutError::UnknownEndianness(other.to_string())),
    };

    let mut chars = rest.chars();
    let is_signed = match chars.next() {
        Some('s') => true,
        Some('u') => false,
        _ => return Err(malformed()),
    };

    let (bit_width, rest) = take_number(chars.as_str()).ok_or_else(malformed)?;
    let rest = rest.strip_prefix('/').ok_or_else(malformed)?;
    let (frame_bit_width, rest) = take_number(rest).ok_or_else(malformed)?;
    let rest = rest.strip_prefix(">>").ok_or_else(malformed)?;
    let (bit_shift, rest) = take_number(rest).ok_or_else(malformed)?;
    if !rest.is_empty() {
        return Err(malformed());
    }

    let format = ChannelFormat {
        is_little_endian,
        is_signed,
        bit_width,
        frame_bit_width,
        bit_shift,
    };
    validate(&format).map_err(|reason| LayoutError::InconsistentBitLayout {
        descriptor: type_text.to_string(),
        reason,
    })?;

    Ok(format)
}

/// Parse both descriptor strings of one channel
pub fn parse_scan_element(index_text: &str, type_text: &str) -> Result<ScanElement, LayoutError> {
    Ok(ScanElement {
        stream_index: parse_index(index_text)?,
        format: parse_type(type_text)?,
    })
}

/// Check a format built outside the parser against the same layout rules
pub(crate) fn check_format(format: &ChannelFormat) -> Result<(), LayoutError> {
    validate(format).map_err(|reason| LayoutError::InconsistentBitLayout {
        descriptor: format.to_string(),
        reason,
    })
}

/// Split a leading run of ASCII digits off `input` and parse it
fn take_number(input: &str) -> Option<(u32, &str)> {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    if end == 0 {
        return None;
    }
    let value = input[..end].parse().ok()?;
    Some((value, &input[end..]))
}

fn validate(format: &ChannelFormat) -> Result<(), &'static str> {
    if format.bit_width == 0 {
        return Err("bit width must be at least 1");
    }
    if format.frame_bit_width == 0 || format.frame_bit_width % 8 != 0 {
        return Err("frame width must be a positive multiple of 8");
    }
    if format.frame_bit_width > MAX_FRAME_BITS {
        return Err("frame width exceeds 64 bits");
    }
    if format.bit_width > format.frame_bit_width
        || format.bit_shift > format.frame_bit_width - format.bit_width
    {
        return Err("bit width plus shift exceeds frame width");
    }
    Ok(())
}
