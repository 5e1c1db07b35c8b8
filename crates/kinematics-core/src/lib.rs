//! Two-body reaction kinematics engine.
//!
//! Pipeline: energetics → kinematic factors → angle sweep tables, driven by
//! [`orchestrator::compute_kinematics`]. Recoil identification goes through
//! [`composer`] and an [`composer::IsotopeService`].

pub mod composer;
pub mod energetics;
pub mod factors;
pub mod orchestrator;
pub mod table;

pub use composer::{compose_heavy_recoil, IsotopeService, NuclideTable};
pub use energetics::{compute_energetics, Energetics};
pub use factors::{solve_factors, KinematicFactors};
pub use orchestrator::{compute_kinematics, KinematicsReport, KinematicsRequest};
pub use table::{generate_tables, KinematicTableRow, KinematicTables, SeriesPoint};
