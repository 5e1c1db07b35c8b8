use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KinematicsError {
    #[error("Missing input: {role} nuclide is required")]
    MissingInput { role: &'static str },

    #[error("Invalid beam energy: {0}")]
    InvalidEnergy(String),

    #[error("Energetically forbidden: E_cm ({cm_energy}) + Q ({q_value}) < 0")]
    EnergeticallyForbidden { cm_energy: Decimal, q_value: Decimal },

    #[error("No kinematic solution: factor {factor} = {value}")]
    NoKinematicSolution { factor: &'static str, value: Decimal },

    #[error("Invalid recoil: A={mass_number}, Z={atomic_number}")]
    InvalidRecoil { mass_number: i64, atomic_number: i64 },

    #[error("Invalid nuclide: {0}")]
    InvalidNuclide(String),

    #[error(
        "Unbalanced reaction: heavy (A={heavy_a}, Z={heavy_z}) but beam+target-light gives (A={expected_a}, Z={expected_z})"
    )]
    UnbalancedReaction {
        heavy_a: u32,
        heavy_z: u32,
        expected_a: i64,
        expected_z: i64,
    },

    #[error("Unknown nuclide: A={mass_number}, Z={atomic_number}")]
    UnknownNuclide { mass_number: u32, atomic_number: u32 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type KinematicsResult<T> = Result<T, KinematicsError>;
