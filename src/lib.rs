//! Decoding of IIO scan-element channel layouts and extraction of
//! per-channel samples from interleaved DMA frame buffers.

pub mod hal;
