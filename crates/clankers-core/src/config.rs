use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

fn default_link_lengths() -> Vec<f64> {
    vec![0.3, 0.25, 0.1]
}
const fn default_tolerance() -> f64 {
    1e-9
}

// ---------------------------------------------------------------------------
// PlanarArmConfig
// ---------------------------------------------------------------------------

/// Geometry and limits of a planar revolute arm.
///
/// Every joint rotates about +Z and each link extends along the local +X
/// axis. The last three joints are solved in closed form; any joints before
/// them are free parameters supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarArmConfig {
    /// Length of the link following each joint, base to tip (meters).
    #[serde(default = "default_link_lengths")]
    pub link_lengths: Vec<f64>,

    /// Optional `[lower, upper]` range per joint (radians).
    /// `None` leaves every joint unbounded.
    #[serde(default)]
    pub joint_limits: Option<Vec<[f64; 2]>>,

    /// Numerical tolerance for planarity checks and singular configurations.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for PlanarArmConfig {
    fn default() -> Self {
        Self {
            link_lengths: default_link_lengths(),
            joint_limits: None,
            tolerance: default_tolerance(),
        }
    }
}

impl PlanarArmConfig {
    /// Arm with the given link lengths, no limits and default tolerance.
    pub fn with_links(link_lengths: Vec<f64>) -> Self {
        Self {
            link_lengths,
            ..Self::default()
        }
    }

    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.link_lengths.len() < 3 {
            return Err(ConfigError::TooFewLinks(self.link_lengths.len()));
        }
        for (index, &value) in self.link_lengths.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidLinkLength { index, value });
            }
        }
        if let Some(limits) = &self.joint_limits {
            if limits.len() != self.link_lengths.len() {
                return Err(ConfigError::LimitCountMismatch {
                    expected: self.link_lengths.len(),
                    got: limits.len(),
                });
            }
            for (index, &[lower, upper]) in limits.iter().enumerate() {
                if lower.is_nan() || upper.is_nan() || lower > upper {
                    return Err(ConfigError::InvalidLimits {
                        index,
                        lower,
                        upper,
                    });
                }
            }
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }

    /// Total number of joints (one per link).
    pub fn num_joints(&self) -> usize {
        self.link_lengths.len()
    }

    /// Number of leading joints left to the caller as free parameters.
    pub fn num_free_parameters(&self) -> usize {
        self.link_lengths.len().saturating_sub(3)
    }

    /// Maximum distance from base to tool point.
    pub fn reach(&self) -> f64 {
        self.link_lengths.iter().sum()
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
