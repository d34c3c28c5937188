use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::registry::ChannelRegistry;
use super::scan_elements::ScanElementsDir;
use super::types::Direction;

/// Description of one device's channels, as stored in a JSON profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceProfile {
    /// Device name, used only for reporting
    pub name: String,

    /// Directory holding the `<channel>_index` / `<channel>_type` files.
    /// Relative paths resolve against the profile file's directory.
    pub scan_elements_dir: PathBuf,

    /// Channels to decode, with their direction stated explicitly
    pub channels: Vec<ChannelSpec>,

    /// Register channels even when their `_en` file reports them disabled
    #[serde(default)]
    pub include_disabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelSpec {
    pub name: String,
    pub direction: Direction,
}

impl DeviceProfile {
    /// Load a profile from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .context(format!("Failed to read profile from {:?}", path))?;

        let mut profile: DeviceProfile = serde_json::from_str(&json)
            .context("Failed to deserialize device profile")?;

        if profile.scan_elements_dir.is_relative() {
            if let Some(parent) = path.parent() {
                profile.scan_elements_dir = parent.join(&profile.scan_elements_dir);
            }
        }

        Ok(profile)
    }

    /// Read every listed channel's scan element and register it
    pub fn build_registry(&self) -> Result<ChannelRegistry> {
        let scan = ScanElementsDir::new(&self.scan_elements_dir);
        let mut registry = ChannelRegistry::new();

        for spec in &self.channels {
            if !self.include_disabled && !scan.is_enabled(&spec.name)? {
                warn!(device = %self.name, channel = %spec.name, "channel disabled, skipping");
                continue;
            }

            let element = scan.read_channel(&spec.name)?;
            registry
                .add_channel(&spec.name, spec.direction, element)
                .with_context(|| format!("Cannot add channel {} to {}", spec.name, self.name))?;
        }

        info!(device = %self.name, channels = registry.len(), "built channel layout");
        Ok(registry)
    }
}
