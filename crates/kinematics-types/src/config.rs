// ─────────────────────────────────────────────────────────────────────
// SCPN Reaction Kinematics — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{
    BACKWARD_STEPS_PER_DEGREE, DEGREE_PI, ENERGY_CUTOFF_MEV, FINITE_DIFFERENCE_STEP_RAD,
    FORWARD_STEPS_PER_DEGREE, MAX_ANGLE_DEG, ROUNDING_DECIMALS,
};
use crate::error::{KinematicsError, KinematicsResult};
use serde::{Deserialize, Serialize};

/// Resolution and accuracy settings for the angle sweep.
///
/// Every field is optional in JSON; missing fields take the defaults from
/// [`crate::constants`], which reproduce the reference calculator's tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Forward grid points per degree (10 → 0.1° steps, 1801 points).
    #[serde(default = "default_forward_steps")]
    pub forward_steps_per_degree: u32,
    /// Backward-branch points per degree (2 → 0.5° steps).
    #[serde(default = "default_backward_steps")]
    pub backward_steps_per_degree: u32,
    /// Upper end of the lab angle grid [deg].
    #[serde(default = "default_max_angle_deg")]
    pub max_angle_deg: f64,
    /// Step for the CM-angle finite-difference test [rad].
    #[serde(default = "default_fd_step")]
    pub finite_difference_step_rad: f64,
    /// Minimum lab energy [MeV] kept in any series or table row.
    #[serde(default = "default_energy_cutoff")]
    pub energy_cutoff: f64,
    /// Decimals kept by round-half-up on published values.
    #[serde(default = "default_rounding_decimals")]
    pub rounding_decimals: u32,
    /// π used for degree/radian conversion of grid angles.
    #[serde(default = "default_degree_pi")]
    pub degree_pi: f64,
    /// Sweep light and heavy particles on separate rayon tasks.
    #[serde(default)]
    pub parallel_branches: bool,
}

fn default_forward_steps() -> u32 {
    FORWARD_STEPS_PER_DEGREE
}
fn default_backward_steps() -> u32 {
    BACKWARD_STEPS_PER_DEGREE
}
fn default_max_angle_deg() -> f64 {
    MAX_ANGLE_DEG
}
fn default_fd_step() -> f64 {
    FINITE_DIFFERENCE_STEP_RAD
}
fn default_energy_cutoff() -> f64 {
    ENERGY_CUTOFF_MEV
}
fn default_rounding_decimals() -> u32 {
    ROUNDING_DECIMALS
}
fn default_degree_pi() -> f64 {
    DEGREE_PI
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            forward_steps_per_degree: default_forward_steps(),
            backward_steps_per_degree: default_backward_steps(),
            max_angle_deg: default_max_angle_deg(),
            finite_difference_step_rad: default_fd_step(),
            energy_cutoff: default_energy_cutoff(),
            rounding_decimals: default_rounding_decimals(),
            degree_pi: default_degree_pi(),
            parallel_branches: false,
        }
    }
}

impl SweepConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> KinematicsResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> KinematicsResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> KinematicsResult<()> {
        if self.forward_steps_per_degree == 0 || self.backward_steps_per_degree == 0 {
            return Err(KinematicsError::ConfigError(
                "sweep steps per degree must be at least 1".to_string(),
            ));
        }
        if !self.max_angle_deg.is_finite()
            || self.max_angle_deg <= 0.0
            || self.max_angle_deg > MAX_ANGLE_DEG
        {
            return Err(KinematicsError::ConfigError(format!(
                "max_angle_deg must lie in (0, {MAX_ANGLE_DEG}], got {}",
                self.max_angle_deg
            )));
        }
        if !self.finite_difference_step_rad.is_finite() || self.finite_difference_step_rad <= 0.0 {
            return Err(KinematicsError::ConfigError(format!(
                "finite_difference_step_rad must be finite and > 0, got {}",
                self.finite_difference_step_rad
            )));
        }
        if !self.energy_cutoff.is_finite() || self.energy_cutoff <= 0.0 {
            return Err(KinematicsError::ConfigError(format!(
                "energy_cutoff must be finite and > 0, got {}",
                self.energy_cutoff
            )));
        }
        if self.rounding_decimals > 12 {
            return Err(KinematicsError::ConfigError(format!(
                "rounding_decimals must be <= 12, got {}",
                self.rounding_decimals
            )));
        }
        if !(3.14..3.15).contains(&self.degree_pi) {
            return Err(KinematicsError::ConfigError(format!(
                "degree_pi out of range: {}",
                self.degree_pi
            )));
        }
        Ok(())
    }

    /// Number of forward grid points (1801 for the defaults).
    pub fn forward_points(&self) -> usize {
        grid_points(self.max_angle_deg, self.forward_steps_per_degree)
    }

    /// Number of backward-branch grid points (361 for the defaults).
    pub fn backward_points(&self) -> usize {
        grid_points(self.max_angle_deg, self.backward_steps_per_degree)
    }

    pub fn deg_to_rad(&self, deg: f64) -> f64 {
        deg * self.degree_pi / 180.0
    }

    pub fn rad_to_deg(&self, rad: f64) -> f64 {
        rad * 180.0 / self.degree_pi
    }
}

/// Grid indices `0..=n` whose angle `i / steps` stays within `max_angle_deg`.
fn grid_points(max_angle_deg: f64, steps_per_degree: u32) -> usize {
    // Slack absorbs products like 179.9 * 10 landing just under an integer.
    (max_angle_deg * steps_per_degree as f64 + 1e-9).floor() as usize + 1
}
