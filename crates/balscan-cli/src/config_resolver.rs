//! Locates the `Scan.toml` for a project.
//!
//! Resolution order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `configPath` of the `[scan]` table in `{project}/Ballerina.toml`,
//!    relative paths taken from the project root
//! 3. `{project}/Scan.toml`, when `Ballerina.toml` has no `[scan]` table
//! 4. No config found → defaults
//!
//! A `[scan]` table without `configPath` is an error, as is a `configPath`
//! that names no file.

use anyhow::{bail, Context, Result};
use balscan_core::SCAN_FILE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Package manifest holding the `[scan]` table.
pub const BALLERINA_TOML: &str = "Ballerina.toml";

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Named by `[scan] configPath` in `Ballerina.toml`.
    Manifest(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Manifest(p) | Self::Project(p) => Some(p),
            Self::Default => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ManifestDto {
    scan: Option<ScanTableDto>,
}

#[derive(Debug, Deserialize)]
struct ScanTableDto {
    #[serde(rename = "configPath")]
    config_path: Option<String>,
}

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
///
/// # Errors
///
/// Returns an error if `Ballerina.toml` cannot be read or parsed, if its
/// `[scan]` table lacks `configPath`, or if `configPath` names no file.
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> Result<ConfigSource> {
    if let Some(p) = explicit {
        return Ok(ConfigSource::Explicit(p.to_path_buf()));
    }

    if let Some(table) = scan_table(project_dir)? {
        let Some(config_path) = table.config_path else {
            bail!("Missing 'configPath' in the [scan] table of {BALLERINA_TOML}");
        };
        let path = project_dir.join(&config_path);
        if !path.is_file() {
            bail!("Scan configuration not found: {}", path.display());
        }
        tracing::debug!("Found config via {}: {}", BALLERINA_TOML, path.display());
        return Ok(ConfigSource::Manifest(path));
    }

    let candidate = project_dir.join(SCAN_FILE);
    if candidate.exists() {
        tracing::debug!("Found project config: {}", candidate.display());
        return Ok(ConfigSource::Project(candidate));
    }

    Ok(ConfigSource::Default)
}

/// Reads the `[scan]` table; a missing manifest counts as no table.
fn scan_table(project_dir: &Path) -> Result<Option<ScanTableDto>> {
    let manifest = project_dir.join(BALLERINA_TOML);
    if !manifest.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&manifest)
        .with_context(|| format!("Failed to read {}", manifest.display()))?;
    let dto: ManifestDto = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", manifest.display()))?;
    Ok(dto.scan)
}
