pub mod descriptor;
pub mod device_profile;
pub mod error;
pub mod registry;
pub mod sample_extractor;
pub mod scan_elements;
pub mod types;

pub use descriptor::{parse_index, parse_scan_element, parse_type};
pub use device_profile::{ChannelSpec, DeviceProfile};
pub use error::LayoutError;
pub use registry::ChannelRegistry;
pub use sample_extractor::{extract_samples, normalize, ChannelSamples, Samples};
pub use scan_elements::ScanElementsDir;
pub use types::{ChannelFormat, ChannelLayout, Direction, ScanElement};
