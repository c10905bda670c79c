//! Emitted-asset manifest.
//!
//! Produced by the bundling side of the pipeline once every module has been
//! processed, and consumed read-only by the post-bundle markup pass. Also
//! serialized to `manifest.json` in the output directory so embedding hosts
//! can resolve final asset paths themselves.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Kind of an emitted output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Static file emitted under a content-hashed name.
    Asset,
    /// Transformed script or stylesheet module.
    Chunk,
}

/// One emitted output: its final key, its kind, and the source reference it
/// originated from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Output path relative to the output root, e.g. `assets/og-image-a1b2c3d4.png`.
    pub key: String,
    pub kind: AssetKind,
    /// Source path the output was produced from, relative to the source root.
    pub source: String,
}

impl ManifestEntry {
    pub fn new(key: impl Into<String>, kind: AssetKind, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            kind,
            source: source.into(),
        }
    }
}

/// All outputs emitted by one build, in emission order.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    entries: Vec<ManifestEntry>,
}

impl AssetManifest {
    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    /// Find the first `asset` entry whose key contains `marker`.
    pub fn find_asset(&self, marker: &str) -> Option<&ManifestEntry> {
        self.entries
            .iter()
            .find(|e| e.kind == AssetKind::Asset && e.key.contains(marker))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the manifest as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write manifest to `{}`", path.display()))
    }

    /// Parse a manifest previously written by `write_json`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("malformed asset manifest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_asset_matches_marker_and_kind() {
        let mut m = AssetManifest::default();
        m.push(ManifestEntry::new("js/main.js", AssetKind::Chunk, "js/main.js"));
        m.push(ManifestEntry::new(
            "assets/og-image-ABC123.png",
            AssetKind::Asset,
            "assets/og-image.png",
        ));

        let entry = m.find_asset("og-image").unwrap();
        assert_eq!(entry.key, "assets/og-image-ABC123.png");
        assert!(m.find_asset("favicon").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut m = AssetManifest::default();
        m.push(ManifestEntry::new(
            "assets/logo-deadbeef.svg",
            AssetKind::Asset,
            "assets/logo.svg",
        ));

        let json = serde_json::to_string(&m).unwrap();
        let back = AssetManifest::from_json(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.find_asset("logo").unwrap().source, "assets/logo.svg");
    }
}
