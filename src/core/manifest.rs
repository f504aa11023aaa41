use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// JSON description of an ordered frame set:
///
/// ```json
/// {
///   "frames": ["https://cdn.example.com/chair/000.jpg", "..."],
///   "demo": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinManifest {
    /// Frame sources in rotation order.
    pub frames: Vec<String>,

    /// Play one automatic rotation once the frames load.
    #[serde(default)]
    pub demo: bool,
}

impl SpinManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
