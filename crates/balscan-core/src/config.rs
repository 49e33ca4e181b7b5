//! `Scan.toml` configuration.
//!
//! ```toml
//! [[platform]]
//! name = "sonarqube"
//! path = "/opt/plugins/sonar-platform"
//! sonarProjectKey = "demo"
//!
//! [[analyzer]]
//! org = "exampleOrg"
//! name = "example_module_static_code_analyzer"
//! version = "1.0.0"
//! repository = "local"
//!
//! [rule]
//! include = ["ballerina:1"]
//! exclude = ["ballerina:2"]
//! ```

use crate::external::AnalyzerDescriptor;
use crate::filter::RuleFilter;
use miette::Diagnostic;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Default configuration file name.
pub const SCAN_FILE: &str = "Scan.toml";

/// Repository name that keeps a declared analyzer's repository.
pub const LOCAL_REPOSITORY: &str = "local";

/// Configuration errors.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// IO error reading the config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(balscan::config::io))]
    Io {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("Failed to parse Scan.toml: {message}")]
    #[diagnostic(code(balscan::config::parse))]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// An `[[analyzer]]` entry lacks `org` or `name`.
    #[error("[[analyzer]] entry #{index} is missing '{field}'")]
    #[diagnostic(
        code(balscan::config::analyzer),
        help("every [[analyzer]] entry needs a non-empty 'org' and 'name'")
    )]
    MissingAnalyzerField {
        /// Zero-based entry index.
        index: usize,
        /// Missing field.
        field: &'static str,
    },

    /// A `[[platform]]` entry lacks `name`.
    #[error("[[platform]] entry #{index} is missing 'name'")]
    #[diagnostic(code(balscan::config::platform))]
    MissingPlatformName {
        /// Zero-based entry index.
        index: usize,
    },
}

/// A `[[platform]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Platform name.
    pub name: String,
    /// Location of the platform plugin.
    pub path: Option<PathBuf>,
    /// Every other key, passed to the platform as-is.
    pub args: BTreeMap<String, String>,
}

/// Validated `Scan.toml` contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanConfig {
    /// Platforms to forward results to.
    pub platforms: Vec<PlatformConfig>,
    /// External analyzers the project uses.
    pub analyzers: Vec<AnalyzerDescriptor>,
    /// Rule include/exclude sets.
    pub rules: RuleFilter,
}

#[derive(Debug, Default, Deserialize)]
struct ScanTomlDto {
    #[serde(default)]
    platform: Vec<PlatformDto>,
    #[serde(default)]
    analyzer: Vec<AnalyzerDto>,
    #[serde(default)]
    rule: RuleTableDto,
}

#[derive(Debug, Deserialize)]
struct PlatformDto {
    name: Option<String>,
    path: Option<String>,
    #[serde(flatten)]
    args: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct AnalyzerDto {
    org: Option<String>,
    name: Option<String>,
    version: Option<toml::Value>,
    repository: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RuleTableDto {
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
}

impl ScanConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or an entry lacks a
    /// required field. Nothing is applied in that case.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let dto: ScanTomlDto = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;

        let platforms = dto
            .platform
            .into_iter()
            .enumerate()
            .map(|(index, platform)| platform_from_dto(index, platform))
            .collect::<Result<Vec<_>, _>>()?;

        let analyzers = dto
            .analyzer
            .into_iter()
            .enumerate()
            .map(|(index, analyzer)| analyzer_from_dto(index, analyzer))
            .collect::<Result<Vec<_>, _>>()?;

        let rules = RuleFilter::new()
            .include(dto.rule.include)
            .exclude(dto.rule.exclude);

        Ok(Self {
            platforms,
            analyzers,
            rules,
        })
    }
}

fn platform_from_dto(index: usize, dto: PlatformDto) -> Result<PlatformConfig, ConfigError> {
    let name = dto
        .name
        .filter(|name| !name.is_empty())
        .ok_or(ConfigError::MissingPlatformName { index })?;

    let args = dto
        .args
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect();

    Ok(PlatformConfig {
        name,
        path: dto.path.map(PathBuf::from),
        args,
    })
}

fn analyzer_from_dto(index: usize, dto: AnalyzerDto) -> Result<AnalyzerDescriptor, ConfigError> {
    let org = dto
        .org
        .filter(|org| !org.is_empty())
        .ok_or(ConfigError::MissingAnalyzerField { index, field: "org" })?;
    let name = dto
        .name
        .filter(|name| !name.is_empty())
        .ok_or(ConfigError::MissingAnalyzerField { index, field: "name" })?;

    let version = match dto.version {
        Some(toml::Value::String(version)) if is_release_version(&version) => Some(version),
        Some(other) => {
            warn!("Ignoring invalid version {} for analyzer {}/{}", other, org, name);
            None
        }
        None => None,
    };

    let repository = dto
        .repository
        .filter(|repository| repository == LOCAL_REPOSITORY && version.is_some());

    Ok(AnalyzerDescriptor {
        org,
        name,
        version,
        repository,
    })
}

/// Whether `version` is `major.minor.patch` with numeric parts.
fn is_release_version(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}
