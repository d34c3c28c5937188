use thiserror::Error;

/// Failures raised while decoding channel layouts or extracting samples.
///
/// All of these are static-configuration errors: the caller decides whether
/// to abort device setup or skip the offending channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("malformed channel index {0:?}")]
    MalformedIndex(String),

    #[error("unknown endianness {0:?}, expected \"le\" or \"be\"")]
    UnknownEndianness(String),

    #[error("malformed type descriptor {0:?}")]
    MalformedTypeDescriptor(String),

    #[error("inconsistent bit layout in {descriptor:?}: {reason}")]
    InconsistentBitLayout {
        descriptor: String,
        reason: &'static str,
    },

    #[error("channel {0:?} already registered")]
    DuplicateChannelName(String),

    #[error("stream index {index} of channel {name:?} already used by {existing:?}")]
    DuplicateStreamIndex {
        name: String,
        index: u32,
        existing: String,
    },

    #[error("channel {name:?} has a {actual}-bit frame, device frame is {expected} bits")]
    FrameWidthMismatch {
        name: String,
        expected: u32,
        actual: u32,
    },

    #[error("channel {0:?} not found")]
    ChannelNotFound(String),

    #[error("no channels registered")]
    EmptyRegistry,

    #[error("buffer of {len} bytes is not a whole number of {frame_bytes}-byte frames")]
    BufferSizeMismatch { len: usize, frame_bytes: usize },
}
