//! Generator configuration.
//!
//! Settings come from an optional YAML file; command-line flags override the
//! layout afterwards. Everything has a default matching the Info build.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scan::DEFAULT_MARKER;

/// Config file names searched for in the current directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["makedoc.yaml", ".makedoc.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Text introducing each declaration
    pub marker: String,
    /// Directory receiving the generated files
    pub output_dir: PathBuf,
    /// Declarations header (default: funs.h)
    pub funs_file: String,
    /// Documentation array source (default: doc.c)
    pub doc_file: String,
    /// Key name array source (default: key.c)
    pub key_file: String,
    pub layout: Layout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            output_dir: PathBuf::from("."),
            funs_file: "funs.h".to_string(),
            doc_file: "doc.c".to_string(),
            key_file: "key.c".to_string(),
            layout: Layout::default(),
        }
    }
}

/// Which optional fields the generated tables carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Layout {
    /// Emit `A_<name>` key defines and reference them from the tables
    pub numeric_keys: bool,
    /// Emit the user-visible name in the documentation array
    pub named_functions: bool,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            numeric_keys: true,
            named_functions: true,
        }
    }
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `explicit` if given, else a discovered file, else the defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(Path::new(".")),
        };

        let config = match path {
            Some(p) => {
                tracing::debug!(path = %p.display(), "loading configuration");
                Self::parse_file(&p)
                    .map_err(|e| anyhow::anyhow!("parsing config {}: {}", p.display(), e))?
            }
            None => Self::default(),
        };
        validate(&config)?;
        Ok(config)
    }

    pub fn funs_path(&self) -> PathBuf {
        self.output_dir.join(&self.funs_file)
    }

    pub fn doc_path(&self) -> PathBuf {
        self.output_dir.join(&self.doc_file)
    }

    pub fn key_path(&self) -> PathBuf {
        self.output_dir.join(&self.key_file)
    }
}

/// Find a config file in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Validate a configuration.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.marker.is_empty() {
        anyhow::bail!("marker must not be empty");
    }

    for (field, value) in [
        ("funs_file", &config.funs_file),
        ("doc_file", &config.doc_file),
        ("key_file", &config.key_file),
    ] {
        if value.is_empty() {
            anyhow::bail!("{} must not be empty", field);
        }
    }

    Ok(())
}
