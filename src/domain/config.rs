use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for a traceability run.
///
/// Loaded from `reqtrace.toml` in the working directory. Command-line
/// flags take precedence over the file; a missing or invalid file falls
/// back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Root directories scanned for markdown documents.
    pub roots: Vec<PathBuf>,

    /// Directory generated reports are written to.
    pub outdir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: default_roots(),
            outdir: default_outdir(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }
}

fn default_roots() -> Vec<PathBuf> {
    [".kiro", "spec", "docs"].iter().map(PathBuf::from).collect()
}

fn default_outdir() -> PathBuf {
    PathBuf::from("ci_out")
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        /// Root directories scanned for markdown documents.
        #[serde(default = "default_roots")]
        roots: Vec<PathBuf>,

        /// Directory generated reports are written to.
        #[serde(default = "default_outdir")]
        outdir: PathBuf,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { roots, outdir } => Self { roots, outdir },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            roots: config.roots,
            outdir: config.outdir,
        }
    }
}
