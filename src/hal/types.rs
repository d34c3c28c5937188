use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::descriptor;
use super::error::LayoutError;

/// Whether a channel is read from or written to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

/// Bit packing of one channel inside the device-wide container word.
///
/// Serialises as its descriptor text, e.g. `"le:u16/32>>16"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChannelFormat {
    pub is_little_endian: bool,
    pub is_signed: bool,
    /// Significant bits in the raw sample
    pub bit_width: u32,
    /// Width of the container word holding one device frame
    pub frame_bit_width: u32,
    /// Low-order bits to discard after reading the container word
    pub bit_shift: u32,
}

impl ChannelFormat {
    pub fn frame_byte_width(&self) -> usize {
        (self.frame_bit_width / 8) as usize
    }

    /// Mask selecting the low `bit_width` bits
    pub fn value_mask(&self) -> u64 {
        if self.bit_width >= 64 {
            u64::MAX
        } else {
            (1u64 << self.bit_width) - 1
        }
    }
}

impl fmt::Display for ChannelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}{}/{}>>{}",
            if self.is_little_endian { "le" } else { "be" },
            if self.is_signed { 's' } else { 'u' },
            self.bit_width,
            self.frame_bit_width,
            self.bit_shift
        )
    }
}

impl FromStr for ChannelFormat {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        descriptor::parse_type(s)
    }
}

impl TryFrom<String> for ChannelFormat {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChannelFormat> for String {
    fn from(format: ChannelFormat) -> Self {
        format.to_string()
    }
}

/// One channel's index and type files, decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanElement {
    /// Position of this channel in the interleaved stream
    pub stream_index: u32,
    pub format: ChannelFormat,
}

/// Decoded layout of one named hardware channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelLayout {
    pub name: String,
    pub stream_index: u32,
    pub direction: Direction,
    pub format: ChannelFormat,
}

impl ChannelLayout {
    pub fn new(name: impl Into<String>, direction: Direction, element: ScanElement) -> Self {
        Self {
            name: name.into(),
            stream_index: element.stream_index,
            direction,
            format: element.format,
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = &self.format;
        writeln!(f, "Name\t\t{}", self.name)?;
        writeln!(f, "Direction\t{:?}", self.direction)?;
        writeln!(f, "Index\t\t{}", self.stream_index)?;
        writeln!(
            f,
            "{}, {} endian",
            if format.is_signed { "signed" } else { "unsigned" },
            if format.is_little_endian { "little" } else { "big" }
        )?;
        writeln!(
            f,
            "{} bits, shifted down by {} bits",
            format.bit_width, format.bit_shift
        )?;
        write!(f, "{} bits in one device frame", format.frame_bit_width)
    }
}
