//! Output writing: per-project artifacts plus the combined run file.
//!
//! Files are named by lowercase symbol and overwritten on rerun. The combined
//! file can always be rebuilt from the per-project files, so an interrupted
//! run loses nothing that was already written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::{CombinedOutput, ProjectProfile};

pub const COMBINED_FILE: &str = "all_projects.json";

pub struct OutputWriter {
    dir: PathBuf,
    combined: CombinedOutput,
}

impl OutputWriter {
    /// Creates the writer, making the output directory if absent.
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            combined: CombinedOutput::default(),
        })
    }

    /// Writes the raw text and structured JSON for one project and records the
    /// profile in the in-memory combined collection.
    pub fn write_project(
        &mut self,
        symbol: &str,
        raw_text: &str,
        profile: ProjectProfile,
    ) -> Result<()> {
        let symbol = symbol.to_lowercase();

        let raw_path = self.dir.join(format!("{symbol}_raw.txt"));
        fs::write(&raw_path, raw_text)
            .with_context(|| format!("Failed to write {}", raw_path.display()))?;

        let json_path = self.dir.join(format!("{symbol}.json"));
        let json = serde_json::to_string_pretty(&profile)
            .context("Failed to serialize project profile")?;
        fs::write(&json_path, json)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;

        self.combined.projects.insert(symbol, profile);
        Ok(())
    }

    /// Serializes the combined collection to `all_projects.json`.
    pub fn write_combined(&self) -> Result<PathBuf> {
        let path = self.dir.join(COMBINED_FILE);
        let json = serde_json::to_string_pretty(&self.combined)
            .context("Failed to serialize combined output")?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn written(&self) -> usize {
        self.combined.projects.len()
    }
}

/// Rebuilds the combined file from the per-project JSON files on disk.
/// Keys follow filename (lowercase symbol), in sorted filename order.
pub fn rebuild_combined(dir: &Path) -> Result<usize> {
    let mut combined = CombinedOutput::default();

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read output directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension().is_some_and(|ext| ext == "json")
                && p.file_name().is_some_and(|n| n != COMBINED_FILE)
        })
        .collect();
    paths.sort();

    for path in paths {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let profile: ProjectProfile = match serde_json::from_str(&data) {
            Ok(p) => p,
            Err(e) => {
                warn!("Skipping {}: not a project profile ({e})", path.display());
                continue;
            }
        };
        let symbol = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        combined.projects.insert(symbol, profile);
    }

    let count = combined.projects.len();
    let path = dir.join(COMBINED_FILE);
    let json =
        serde_json::to_string_pretty(&combined).context("Failed to serialize combined output")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Rebuilt {} with {} projects", path.display(), count);
    Ok(count)
}
