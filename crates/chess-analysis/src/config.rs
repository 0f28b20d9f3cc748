//! Tunable analysis parameters.
//!
//! Every value here is a calibration knob rather than a fixed contract, so
//! all of them can be overridden from a TOML file. Missing keys fall back to
//! the defaults.
//!
//! ```toml
//! degrade_failed_plies = true
//!
//! [weights]
//! center_bonus = 0.25
//!
//! [thresholds]
//! good = 0.4
//!
//! [lines]
//! depth = 4
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The configuration parsed but its values are inconsistent.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Weights of the static evaluation terms, in pawns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub pawn: f64,
    pub knight: f64,
    pub bishop: f64,
    pub rook: f64,
    pub queen: f64,
    pub king: f64,
    /// Bonus for each occupied center square (d4, e4, d5, e5).
    pub center_bonus: f64,
    /// Value of one legal move for the side to move.
    pub mobility_weight: f64,
    /// Bonus for each side whose king is on the board.
    pub king_safety_bonus: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            pawn: 1.0,
            knight: 3.0,
            bishop: 3.0,
            rook: 5.0,
            queen: 9.0,
            king: 0.0,
            center_bonus: 0.2,
            mobility_weight: 0.1,
            king_safety_bonus: 0.3,
        }
    }
}

/// Upper bounds (inclusive) of the score gap for each quality tier.
///
/// A gap above `mistake` is a blunder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityThresholds {
    pub brilliant: f64,
    pub good: f64,
    pub normal: f64,
    pub inaccuracy: f64,
    pub mistake: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            brilliant: 0.1,
            good: 0.3,
            normal: 0.7,
            inaccuracy: 1.5,
            mistake: 3.0,
        }
    }
}

impl QualityThresholds {
    fn as_array(&self) -> [f64; 5] {
        [
            self.brilliant,
            self.good,
            self.normal,
            self.inaccuracy,
            self.mistake,
        ]
    }
}

/// Shape of the alternate lines attached to weak moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    /// Number of lines, taken from the top of the ranking.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
    /// Moves per line, root move included.
    #[serde(default = "default_depth")]
    pub depth: usize,
}

fn default_max_lines() -> usize {
    2
}

fn default_depth() -> usize {
    3
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            max_lines: default_max_lines(),
            depth: default_depth(),
        }
    }
}

/// Complete analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub weights: EvalWeights,
    #[serde(default)]
    pub thresholds: QualityThresholds,
    #[serde(default)]
    pub lines: LineConfig,
    /// Replace plies whose probe fails with a neutral judgement instead of
    /// failing the whole game. Defaults to true.
    #[serde(default = "default_degrade")]
    pub degrade_failed_plies: bool,
}

fn default_degrade() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            weights: EvalWeights::default(),
            thresholds: QualityThresholds::default(),
            lines: LineConfig::default(),
            degrade_failed_plies: default_degrade(),
        }
    }
}

impl AnalysisConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML and
    /// [`ConfigError::Invalid`] if the values fail [`Self::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Loads `annotate.toml` from the working directory, or the defaults when
    /// that file does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Default configuration file location.
    pub fn config_path() -> PathBuf {
        PathBuf::from("annotate.toml")
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that thresholds are non-negative and strictly ascending and
    /// that lines have at least one move.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = self.thresholds.as_array();
        if bounds.iter().any(|b| !b.is_finite() || *b < 0.0) {
            return Err(ConfigError::Invalid(
                "quality thresholds must be finite and non-negative".to_string(),
            ));
        }
        if bounds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::Invalid(format!(
                "quality thresholds must be strictly ascending, got {:?}",
                bounds
            )));
        }
        if self.lines.depth == 0 {
            return Err(ConfigError::Invalid("lines.depth must be at least 1".to_string()));
        }
        if self.lines.max_lines == 0 {
            return Err(ConfigError::Invalid(
                "lines.max_lines must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
