use ::config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::analysis::anomaly::DEFAULT_SUSPICION_THRESHOLD;
use crate::errors::{AnalysisError, AnalysisResult};

/// Number of transmissions an analysis compares
pub const TRANSMISSION_COUNT: usize = 2;

/// Configuration for an analysis run.
///
/// # Configuration Locations
///
/// Sources are merged in order of increasing precedence:
/// 1. Global `$HOME/.config/txscout/config.yaml`
/// 2. Local `.txscout.yaml` in the current directory
/// 3. A config file passed with `--config` (must exist)
///
/// Command-line arguments override all of them via [`AnalysisConfig::merge_with_cli`].
///
/// # Configuration Format
///
/// ```yaml
/// # Directory input file names are resolved against
/// root_path: "data"
///
/// # Exactly two transmissions
/// transmissions:
///   - "transmission1.txt"
///   - "transmission2.txt"
///
/// # Reference codes searched for in each transmission
/// codes:
///   - "mcode1.txt"
///   - "mcode2.txt"
///   - "mcode3.txt"
///
/// # Flag a code when its encoded length exceeds this multiple of the expected length
/// suspicion_threshold: 1.5
///
/// # Thread count (default: CPU cores)
/// thread_count: 2
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Directory that relative input paths are resolved against
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// The two transmission files
    #[serde(default = "default_transmissions")]
    pub transmissions: Vec<PathBuf>,

    /// Reference code files
    #[serde(default = "default_codes")]
    pub codes: Vec<PathBuf>,

    /// Multiplier over the expected encoded length before a code is suspicious
    #[serde(default = "default_suspicion_threshold")]
    pub suspicion_threshold: f64,

    /// Number of worker threads
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_root_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_transmissions() -> Vec<PathBuf> {
    (1..=TRANSMISSION_COUNT)
        .map(|i| PathBuf::from(format!("transmission{}.txt", i)))
        .collect()
}

fn default_codes() -> Vec<PathBuf> {
    (1..=3)
        .map(|i| PathBuf::from(format!("mcode{}.txt", i)))
        .collect()
}

fn default_suspicion_threshold() -> f64 {
    DEFAULT_SUSPICION_THRESHOLD
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

pub(crate) fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            transmissions: default_transmissions(),
            codes: default_codes(),
            suspicion_threshold: default_suspicion_threshold(),
            thread_count: default_thread_count(),
            log_level: default_log_level(),
        }
    }
}

/// Command-line overrides; `None` or empty leaves the file value in place
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root_path: Option<PathBuf>,
    pub transmissions: Vec<PathBuf>,
    pub codes: Vec<PathBuf>,
    pub suspicion_threshold: Option<f64>,
    pub thread_count: Option<NonZeroUsize>,
    pub log_level: Option<String>,
}

impl AnalysisConfig {
    /// Loads configuration from the default locations
    pub fn load() -> AnalysisResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus an explicit file.
    ///
    /// The result is not validated; call [`validate`](Self::validate) once CLI overrides
    /// are merged.
    pub fn load_from(config_path: Option<&Path>) -> AnalysisResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let default_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("txscout/config.yaml")),
            // Local config
            Some(PathBuf::from(".txscout.yaml")),
        ];
        for path in default_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges command-line overrides; CLI values take precedence
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(root) = cli.root_path {
            self.root_path = root;
        }
        if !cli.transmissions.is_empty() {
            self.transmissions = cli.transmissions;
        }
        if !cli.codes.is_empty() {
            self.codes = cli.codes;
        }
        if let Some(threshold) = cli.suspicion_threshold {
            self.suspicion_threshold = threshold;
        }
        if let Some(threads) = cli.thread_count {
            self.thread_count = threads;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }

    /// Checks the invariants the analysis relies on
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.transmissions.len() != TRANSMISSION_COUNT {
            return Err(AnalysisError::config_error(format!(
                "expected {} transmissions, found {}",
                TRANSMISSION_COUNT,
                self.transmissions.len()
            )));
        }
        if !self.suspicion_threshold.is_finite() || self.suspicion_threshold <= 0.0 {
            return Err(AnalysisError::config_error(format!(
                "suspicion_threshold must be a positive number, got {}",
                self.suspicion_threshold
            )));
        }
        Ok(())
    }

    /// Transmission paths resolved against `root_path`
    pub fn transmission_paths(&self) -> Vec<PathBuf> {
        self.transmissions
            .iter()
            .map(|p| self.root_path.join(p))
            .collect()
    }

    /// Code paths resolved against `root_path`
    pub fn code_paths(&self) -> Vec<PathBuf> {
        self.codes.iter().map(|p| self.root_path.join(p)).collect()
    }
}
