use std::collections::HashMap;

use tracing::debug;

use super::descriptor::check_format;
use super::error::LayoutError;
use super::sample_extractor::{extract_samples, ChannelSamples, Samples};
use super::types::{ChannelLayout, Direction, ScanElement};

/// Channel layouts of one device, kept in de-interleaving order.
///
/// Filled during discovery through [`ChannelRegistry::add_channel`], then
/// only read.
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    /// Sorted ascending by `stream_index`
    channels: Vec<ChannelLayout>,
    by_name: HashMap<String, usize>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_channel(
        &mut self,
        name: &str,
        direction: Direction,
        element: ScanElement,
    ) -> Result<(), LayoutError> {
        if self.by_name.contains_key(name) {
            return Err(LayoutError::DuplicateChannelName(name.to_string()));
        }
        check_format(&element.format)?;

        if let Some(first) = self.channels.first() {
            let expected = first.format.frame_bit_width;
            let actual = element.format.frame_bit_width;
            if actual != expected {
                return Err(LayoutError::FrameWidthMismatch {
                    name: name.to_string(),
                    expected,
                    actual,
                });
            }
        }

        let position = match self
            .channels
            .binary_search_by_key(&element.stream_index, |ch| ch.stream_index)
        {
            Ok(existing) => {
                return Err(LayoutError::DuplicateStreamIndex {
                    name: name.to_string(),
                    index: element.stream_index,
                    existing: self.channels[existing].name.clone(),
                })
            }
            Err(position) => position,
        };

        debug!(
            channel = name,
            index = element.stream_index,
            format = %element.format,
            ?direction,
            "registered channel"
        );

        self.channels
            .insert(position, ChannelLayout::new(name, direction, element));
        self.reindex();
        Ok(())
    }

    pub fn get_channel(&self, name: &str) -> Result<&ChannelLayout, LayoutError> {
        self.by_name
            .get(name)
            .map(|&i| &self.channels[i])
            .ok_or_else(|| LayoutError::ChannelNotFound(name.to_string()))
    }

    /// All channels in ascending stream order
    pub fn ordered_channels(&self) -> &[ChannelLayout] {
        &self.channels
    }

    pub fn channels_with_direction(
        &self,
        direction: Direction,
    ) -> impl Iterator<Item = &ChannelLayout> {
        self.channels
            .iter()
            .filter(move |ch| ch.direction == direction)
    }

    /// Bytes in one device frame
    pub fn frame_byte_width(&self) -> Result<usize, LayoutError> {
        self.channels
            .first()
            .map(|ch| ch.format.frame_byte_width())
            .ok_or(LayoutError::EmptyRegistry)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Samples of the named channel in `buffer`
    pub fn samples<'a>(&self, name: &str, buffer: &'a [u8]) -> Result<Samples<'a>, LayoutError> {
        extract_samples(buffer, self.get_channel(name)?)
    }

    /// Decode every channel of `buffer`, in stream order
    pub fn deinterleave(&self, buffer: &[u8]) -> Result<Vec<ChannelSamples>, LayoutError> {
        let frame_bytes = self.frame_byte_width()?;
        if buffer.len() % frame_bytes != 0 {
            return Err(LayoutError::BufferSizeMismatch {
                len: buffer.len(),
                frame_bytes,
            });
        }

        self.channels
            .iter()
            .map(|layout| {
                Ok(ChannelSamples {
                    name: layout.name.clone(),
                    stream_index: layout.stream_index,
                    values: extract_samples(buffer, layout)?.collect(),
                })
            })
            .collect()
    }

    fn reindex(&mut self) {
        self.by_name = self
            .channels
            .iter()
            .enumerate()
            .map(|(i, ch)| (ch.name.clone(), i))
            .collect();
    }
}
