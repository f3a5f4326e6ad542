/**
 * config.rs
 * Generator configuration, from a YAML file or RDFSDOC_* environment variables
 *
 * Format:
 * ```yaml
 * rdfsPath: ./schema/cim.rdf
 * plantumlUrl: http://localhost:8080
 * outputPath: ./site
 * title: CIM Profile
 * description: Equipment profile documentation
 * commonNamespace: cim
 * useNamespaceForProperties: false   # optional
 * renderConcurrency: 50              # optional
 * outputFormat: svg                  # optional, svg | png
 * ```
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{DocError, Result};
use crate::model::OutputFormat;
use crate::render::DEFAULT_CONCURRENCY;

pub const ENV_RDFS_PATH: &str = "RDFSDOC_PATH_TO_RDFS";
pub const ENV_PLANTUML_URL: &str = "RDFSDOC_PLANTUML_URL";
pub const ENV_OUTPUT_PATH: &str = "RDFSDOC_OUTPUT_PATH";
pub const ENV_TITLE: &str = "RDFSDOC_TITLE";
pub const ENV_DESCRIPTION: &str = "RDFSDOC_DESCRIPTION";
pub const ENV_COMMON_NAMESPACE: &str = "RDFSDOC_COMMON_NAMESPACE";
pub const ENV_USE_NAMESPACE_FOR_PROPERTIES: &str = "RDFSDOC_USE_NAMESPACE_FOR_PROPERTIES";
pub const ENV_RENDER_CONCURRENCY: &str = "RDFSDOC_RENDER_CONCURRENCY";
pub const ENV_OUTPUT_FORMAT: &str = "RDFSDOC_OUTPUT_FORMAT";

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub rdfs_path: PathBuf,
    pub plantuml_url: String,
    pub output_path: PathBuf,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub common_namespace: String,
    #[serde(default)]
    pub use_namespace_for_properties: bool,
    #[serde(default = "default_concurrency")]
    pub render_concurrency: usize,
    #[serde(default)]
    pub output_format: OutputFormat,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DocError::Config(format!("Config file not found: {}", path.display())));
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup (the environment, or a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| DocError::Config(format!("Environment variable {} is not set", key)))
        };

        let use_namespace_for_properties = match lookup(ENV_USE_NAMESPACE_FOR_PROPERTIES) {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                DocError::Config(format!("{} must be true or false, got {}", ENV_USE_NAMESPACE_FOR_PROPERTIES, value))
            })?,
            None => false,
        };

        let render_concurrency = match lookup(ENV_RENDER_CONCURRENCY) {
            Some(value) => value.trim().parse::<usize>().map_err(|_| {
                DocError::Config(format!("{} must be a positive integer, got {}", ENV_RENDER_CONCURRENCY, value))
            })?,
            None => DEFAULT_CONCURRENCY,
        };

        let output_format = match lookup(ENV_OUTPUT_FORMAT) {
            Some(value) => OutputFormat::parse(&value).ok_or_else(|| {
                DocError::Config(format!("{} must be svg or png, got {}", ENV_OUTPUT_FORMAT, value))
            })?,
            None => OutputFormat::Svg,
        };

        let config = Config {
            rdfs_path: PathBuf::from(required(ENV_RDFS_PATH)?),
            plantuml_url: required(ENV_PLANTUML_URL)?,
            output_path: PathBuf::from(required(ENV_OUTPUT_PATH)?),
            title: required(ENV_TITLE)?,
            description: required(ENV_DESCRIPTION)?,
            common_namespace: required(ENV_COMMON_NAMESPACE)?,
            use_namespace_for_properties,
            render_concurrency,
            output_format,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.common_namespace.trim().is_empty() {
            return Err(DocError::Config("Common namespace cannot be empty".to_string()));
        }
        if self.render_concurrency == 0 {
            return Err(DocError::Config("Render concurrency must be at least 1".to_string()));
        }
        if !(self.plantuml_url.starts_with("http://") || self.plantuml_url.starts_with("https://")) {
            return Err(DocError::Config(format!(
                "PlantUML URL must be http(s), got {}",
                self.plantuml_url
            )));
        }
        Ok(())
    }

    /// Save configuration as YAML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}
