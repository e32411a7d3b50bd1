use crate::error::GeneratorError;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_CONFIG: &str = "pcitab";
const ENV_PREFIX: &str = "PCITAB";

/// Everything a generation run needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Path to the `pci.ids` database.
    pub input: PathBuf,
    /// Directory the table files are written into.
    pub out_dir: PathBuf,
    /// Prefix name literals with `u8`.
    pub utf8_literals: bool,
    pub targets: Vec<TargetConfig>,
}

/// One output table: the devices of `vendor` whose names contain any of `filters`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetConfig {
    pub vendor: String,
    pub filters: Vec<String>,
    /// File name, relative to [`GeneratorConfig::out_dir`] unless absolute.
    pub output: PathBuf,
}

impl TargetConfig {
    pub fn new<I, S>(vendor: impl Into<String>, filters: I, output: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vendor: vendor.into(),
            filters: filters.into_iter().map(Into::into).collect(),
            output: output.into(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("pci.ids"),
            out_dir: PathBuf::from("."),
            utf8_literals: true,
            targets: default_targets(),
        }
    }
}

/// Intel, NVIDIA, AMD, `VMware` and Zhaoxin display adapters.
#[must_use]
pub fn default_targets() -> Vec<TargetConfig> {
    vec![
        TargetConfig::new("8086", ["UHD", "Iris", "Graphics"], "intel.data"),
        TargetConfig::new("10de", ["GeForce", "Quadro", "Tesla", "TITAN"], "nvidia.data"),
        TargetConfig::new("1002", ["Radeon"], "amd.data"),
        TargetConfig::new("15ad", ["VGA"], "vmware.data"),
        TargetConfig::new("1d17", ["GPU"], "zhaoxin.data"),
    ]
}

impl GeneratorConfig {
    /// Resolves a target's output path against [`GeneratorConfig::out_dir`].
    #[must_use]
    pub fn output_path(&self, target: &TargetConfig) -> PathBuf {
        self.out_dir.join(&target.output)
    }

    /// Rejects configurations that cannot produce a meaningful run.
    ///
    /// # Errors
    /// Returns [`GeneratorError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.targets.is_empty() {
            return Err(GeneratorError::invalid_config("no targets configured"));
        }

        let mut outputs = HashSet::new();
        for target in &self.targets {
            if target.vendor.trim().is_empty() {
                return Err(GeneratorError::invalid_config("target with empty vendor id"));
            }
            if target.output.as_os_str().is_empty() {
                return Err(GeneratorError::invalid_config(format!(
                    "target '{}' has no output path",
                    target.vendor
                )));
            }
            if !outputs.insert(self.output_path(target)) {
                return Err(GeneratorError::invalid_config(format!(
                    "output '{}' is used by more than one target",
                    target.output.display()
                )));
            }
        }

        Ok(())
    }
}

/// Loads [`GeneratorConfig`] from built-in defaults, an optional file and the environment.
///
/// Layers, lowest precedence first:
/// 1. **Defaults**: the five fixed display adapter targets reading `./pci.ids`.
/// 2. **File**: `path`, or `pcitab.{toml,json,yaml,..}` in the working directory.
///    An explicit `path` must exist; the default one may be absent.
/// 3. **Environment**: variables prefixed with `PCITAB__`, nested with `__`
///    (e.g., `PCITAB__OUT_DIR=gen`).
///
/// # Errors
/// Returns [`GeneratorError::Config`] if the file is unreadable or does not match the schema.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, GeneratorError> {
    let (source, required) =
        path.map_or_else(|| (PathBuf::from(DEFAULT_CONFIG), false), |p| (p.to_path_buf(), true));

    info!(path = %source.display(), required, "Loading configuration");

    let config = Config::builder()
        .add_source(File::from(source.as_path()).required(required))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .map_err(|source| GeneratorError::Config {
            source,
            context: Some("Failed to build config".into()),
        })?
        .try_deserialize::<GeneratorConfig>()
        .map_err(|source| GeneratorError::Config {
            source,
            context: Some("Failed to deserialize config".into()),
        })?;

    Ok(config)
}
