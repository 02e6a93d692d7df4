//! Icons map for a browser extension manifest
//!
//! Extension manifests reference their toolbar icons through an `icons`
//! object keyed by pixel size. This module writes that object next to the
//! generated PNGs so it can be pasted into `manifest.json`.

use crate::icon_gen::icon_filename;
use anyhow::{Context, Result};
use serde::Serialize;
use std::{collections::BTreeMap, path::Path};

pub const MANIFEST_FILENAME: &str = "icons.json";

/// Root structure of `icons.json`
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct IconManifest {
    /// Icon filename per size, serialized with the size as a string key
    pub icons: BTreeMap<u32, String>,
}

impl IconManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manifest listing `icon-<size>.png` for every size
    pub fn from_sizes(sizes: &[u32]) -> Self {
        let mut manifest = Self::new();
        for &size in sizes {
            manifest.add_icon(size, icon_filename(size));
        }
        manifest
    }

    pub fn add_icon(&mut self, size: u32, filename: String) {
        self.icons.insert(size, filename);
    }
}

/// Write `icons.json` into `out_dir`
pub fn write_manifest(out_dir: &Path, manifest: &IconManifest) -> Result<()> {
    let manifest_path = out_dir.join(MANIFEST_FILENAME);
    let manifest_json =
        serde_json::to_string_pretty(manifest).context("Failed to serialize icons manifest")?;

    std::fs::write(&manifest_path, manifest_json)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    println!("  ✓ Created {MANIFEST_FILENAME}");
    Ok(())
}
