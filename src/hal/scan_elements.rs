use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::descriptor::parse_scan_element;
use super::types::ScanElement;

const INDEX_SUFFIX: &str = "_index";
const TYPE_SUFFIX: &str = "_type";
const ENABLE_SUFFIX: &str = "_en";

/// A sysfs-style `scan_elements` directory.
///
/// Each channel `<name>` is described by the files `<name>_index`,
/// `<name>_type` and optionally `<name>_en`.
pub struct ScanElementsDir {
    path: PathBuf,
}

impl ScanElementsDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the index and type files of one channel
    pub fn read_channel(&self, name: &str) -> Result<ScanElement> {
        let index_text = self.read_file(name, INDEX_SUFFIX)?;
        let type_text = self.read_file(name, TYPE_SUFFIX)?;
        debug!(
            channel = name,
            index = %index_text.trim(),
            descriptor = %type_text.trim(),
            "read scan element"
        );

        let element = parse_scan_element(&index_text, type_text.trim_end())
            .with_context(|| format!("Invalid scan element for channel {}", name))?;
        Ok(element)
    }

    /// Whether the channel is enabled for buffered capture.
    ///
    /// A missing `_en` file counts as disabled.
    pub fn is_enabled(&self, name: &str) -> Result<bool> {
        let path = self.file_path(name, ENABLE_SUFFIX);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(text.trim() == "1"),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).context(format!("Failed to read {:?}", path)),
        }
    }

    /// Names of all channels that have a type file, sorted
    pub fn list_channels(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        let entries = fs::read_dir(&self.path)
            .context(format!("Failed to list scan elements in {:?}", self.path))?;
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            if let Some(name) = file_name
                .to_str()
                .and_then(|f| f.strip_suffix(TYPE_SUFFIX))
            {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    fn read_file(&self, name: &str, suffix: &str) -> Result<String> {
        let path = self.file_path(name, suffix);
        fs::read_to_string(&path).context(format!("Failed to read {:?}", path))
    }

    fn file_path(&self, name: &str, suffix: &str) -> PathBuf {
        self.path.join(format!("{}{}", name, suffix))
    }
}
