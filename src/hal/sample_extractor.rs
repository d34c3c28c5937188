use super::descriptor::check_format;
use super::error::LayoutError;
use super::types::{ChannelFormat, ChannelLayout};

/// Lazily decoded samples of one channel, one value per device frame.
///
/// Holds only a cursor into the borrowed buffer; a clone taken before
/// iterating replays the same samples.
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    frames: std::slice::ChunksExact<'a, u8>,
    format: ChannelFormat,
}

impl Iterator for Samples<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.frames
            .next()
            .map(|frame| decode_word(&self.format, frame))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frames.size_hint()
    }
}

impl ExactSizeIterator for Samples<'_> {}

/// Iterate the samples of `layout`'s channel in an interleaved frame buffer
pub fn extract_samples<'a>(
    buffer: &'a [u8],
    layout: &ChannelLayout,
) -> Result<Samples<'a>, LayoutError> {
    let format = layout.format;
    check_format(&format)?;
    let frame_bytes = format.frame_byte_width();
    if buffer.len() % frame_bytes != 0 {
        return Err(LayoutError::BufferSizeMismatch {
            len: buffer.len(),
            frame_bytes,
        });
    }

    Ok(Samples {
        frames: buffer.chunks_exact(frame_bytes),
        format,
    })
}

/// Decode one frame's container word into this channel's sample.
///
/// Callers hand in chunks of exactly `format.frame_byte_width()` bytes of a
/// format that passed `check_format`.
pub(crate) fn decode_word(format: &ChannelFormat, frame: &[u8]) -> i64 {
    debug_assert_eq!(frame.len(), format.frame_byte_width());
    let mut word = [0u8; 8];
    let raw = if format.is_little_endian {
        word[..frame.len()].copy_from_slice(frame);
        u64::from_le_bytes(word)
    } else {
        word[8 - frame.len()..].copy_from_slice(frame);
        u64::from_be_bytes(word)
    };

    let value = (raw >> format.bit_shift) & format.value_mask();

    if format.is_signed {
        // two's complement over bit_width bits
        let unused = 64 - format.bit_width;
        ((value << unused) as i64) >> unused
    } else {
        value as i64
    }
}

/// Scale a decoded sample to full scale `[-1.0, 1.0)`.
///
/// Unsigned samples are treated as offset binary, the way 8-bit PCM is.
pub fn normalize(format: &ChannelFormat, value: i64) -> f64 {
    let half_scale = 2f64.powi(format.bit_width as i32 - 1);
    if format.is_signed {
        value as f64 / half_scale
    } else {
        // bit-for-bit reinterpretation for 64-bit unsigned fields
        (value as u64 as f64 - half_scale) / half_scale
    }
}

/// All samples of one channel, decoded from a buffer
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSamples {
    pub name: String,
    pub stream_index: u32,
    pub values: Vec<i64>,
}

impl ChannelSamples {
    pub fn normalized(&self, format: &ChannelFormat) -> Vec<f64> {
        self.values.iter().map(|&v| normalize(format, v)).collect()
    }
}
