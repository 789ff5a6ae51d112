/// Run configuration for the curation pipeline.
///
/// Configuration lives in an optional `reform.toml` next to the binary; a
/// missing file falls back to the defaults below, which describe the ppg146
/// dataset this pipeline was built for. There are no CLI flags and no
/// environment variables.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::ingest::phenix::PHENIX_BASE_URL;
use crate::model::ReformError;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL the figure directories hang off of.
    pub base_url: String,
    /// Figure directories to fetch, each with a trailing slash.
    pub figures: Vec<String>,
    /// Where downloaded files land, one subdirectory per figure.
    pub data_dir: String,
    /// Where regrouped output files are written, mirroring `data_dir`.
    pub out_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: PHENIX_BASE_URL.to_string(),
            figures: vec![
                "Figure4/".to_string(),
                "Figure11/".to_string(),
                "Figure12/".to_string(),
            ],
            data_dir: "data".to_string(),
            out_dir: "data_org".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to the defaults when the
    /// file does not exist. A file that exists but fails to parse is an
    /// error, not a silent fallback.
    pub fn load(path: &Path) -> Result<Config, ReformError> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let text = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text).map_err(|e| ReformError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }
}
