// ─────────────────────────────────────────────────────────────────────
// SCPN Reaction Kinematics — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Forward sweep resolution: 10 points per degree gives the 0.1° grid,
/// 1801 points over 0°..180°.
pub const FORWARD_STEPS_PER_DEGREE: u32 = 10;

/// Backward-branch sweep resolution (0.5°).
pub const BACKWARD_STEPS_PER_DEGREE: u32 = 2;

/// Upper end of the lab angle grid [deg].
pub const MAX_ANGLE_DEG: f64 = 180.0;

/// Step used for the finite-difference CM-angle branch test [rad].
pub const FINITE_DIFFERENCE_STEP_RAD: f64 = 0.001;

/// Lab energies below this value [MeV] are numerical noise and dropped.
pub const ENERGY_CUTOFF_MEV: f64 = 1e-8;

/// Published angles and energies keep this many decimals.
pub const ROUNDING_DECIMALS: u32 = 3;

/// π as used for degree/radian conversion of the sweep grid.
/// Kept at 8 decimals so tabulated values match the reference calculator;
/// max emission angles always use `std::f64::consts::PI`.
pub const DEGREE_PI: f64 = 3.14159265;

/// Tolerance below zero at which a square-root discriminant is still
/// treated as zero.
pub const DISCRIMINANT_TOLERANCE: f64 = 1e-12;


/// Largest accepted beam kinetic energy [MeV]. Far past the point where
/// Newtonian kinematics means anything; keeps decimal products in range.
pub const MAX_BEAM_ENERGY_MEV: f64 = 1.0e6;

/// Largest accepted rest mass [MeV], about 50 times the heaviest known nuclide.
pub const MAX_REST_MASS_MEV: i64 = 10_000_000;
