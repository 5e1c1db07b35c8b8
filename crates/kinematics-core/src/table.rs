// ─────────────────────────────────────────────────────────────────────
// SCPN Reaction Kinematics — Angle Sweep Tables
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Lab-angle sweeps producing the plotted series and the coarse table.
//!
//! Each particle gets a forward branch (ascending grid, `+` root) and, when
//! its emission cone is bounded, a backward branch (descending grid, `−`
//! root). Branches are built independently and concatenated forward-first.

use crate::factors::KinematicFactors;
use kinematics_types::config::SweepConfig;
use kinematics_types::constants::DISCRIMINANT_TOLERANCE;
use kinematics_types::error::{KinematicsError, KinematicsResult};
use kinematics_types::reaction::Reaction;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;
use std::f64::consts::PI;

/// One plotted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
}

/// Ordered (angle [deg], value) pairs.
pub type AngleEnergySeries = Vec<SeriesPoint>;

/// Root of the lab-energy quadratic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// `cos θ + sqrt(...)`, the high-energy solution.
    Forward,
    /// `cos θ − sqrt(...)`, present only inside a bounded cone.
    Backward,
}

impl Branch {
    fn sign(self) -> f64 {
        match self {
            Branch::Forward => 1.0,
            Branch::Backward => -1.0,
        }
    }
}

/// Which `asin` solution the CM angle takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmSolution {
    Acute,
    Obtuse,
}

/// Display column for the coarse table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    pub name: &'static str,
    pub selector: &'static str,
    pub sortable: bool,
}

pub const KINEMATIC_COLUMNS: [TableColumn; 6] = [
    TableColumn {
        name: "Lab Angle (deg)",
        selector: "lab_angle",
        sortable: false,
    },
    TableColumn {
        name: "C.M. Angle (deg)",
        selector: "cm_angle",
        sortable: false,
    },
    TableColumn {
        name: "Lab Energy (MeV)",
        selector: "lab_energy",
        sortable: false,
    },
    TableColumn {
        name: "Recoil Lab Angle (deg)",
        selector: "recoil_lab_angle",
        sortable: false,
    },
    TableColumn {
        name: "Recoil C.M. Angle (deg)",
        selector: "recoil_cm_angle",
        sortable: false,
    },
    TableColumn {
        name: "Recoil Energy (MeV)",
        selector: "recoil_lab_energy",
        sortable: false,
    },
];

/// One integer-degree row. Angles in degrees, energies in MeV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KinematicTableRow {
    /// Forward grid index + 1.
    pub id: usize,
    pub lab_angle: f64,
    pub cm_angle: f64,
    pub lab_energy: f64,
    pub recoil_lab_angle: f64,
    pub recoil_cm_angle: f64,
    pub recoil_lab_energy: f64,
}

/// Lab energy series of one particle, raw and divided by `mass_amu`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParticleSeries {
    pub energy: AngleEnergySeries,
    pub energy_per_nucleon: AngleEnergySeries,
}

impl ParticleSeries {
    fn from_points(points: impl IntoIterator<Item = SeriesPoint>, mass_amu: f64) -> Self {
        let energy: AngleEnergySeries = points.into_iter().collect();
        let energy_per_nucleon = energy
            .iter()
            .map(|p| SeriesPoint {
                x: p.x,
                y: p.y / mass_amu,
            })
            .collect();
        ParticleSeries {
            energy,
            energy_per_nucleon,
        }
    }
}

/// Everything the sweep produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KinematicTables {
    /// Light-particle lab energy vs lab angle, forward then backward branch.
    pub light: ParticleSeries,
    /// Heavy-particle lab energy vs lab angle, forward then backward branch.
    pub heavy: ParticleSeries,
    /// Light lab angle → light CM angle.
    pub light_cm_angle: AngleEnergySeries,
    /// Recoil lab angle → light lab angle.
    pub light_heavy_angle: AngleEnergySeries,
    pub table: Vec<KinematicTableRow>,
}

/// `floor(x·10^n + 0.5) / 10^n`; ties go up, unlike banker's rounding.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale + 0.5).floor() / scale
}

/// `E_t · scale · (cos θ ± sqrt(ratio − sin² θ))²`.
///
/// `None` when θ lies outside the particle's emission cone.
pub fn branch_energy(
    total_energy: f64,
    scale: f64,
    ratio: f64,
    theta: f64,
    branch: Branch,
) -> Option<f64> {
    let sin = theta.sin();
    let discriminant = ratio - sin * sin;
    if discriminant < -DISCRIMINANT_TOLERANCE {
        return None;
    }
    let root = theta.cos() + branch.sign() * discriminant.max(0.0).sqrt();
    Some(total_energy * scale * root * root)
}

/// Acute when `sin θ_cm` grows towards the next grid angle, obtuse otherwise.
pub fn select_cm_solution(current: f64, next: Option<f64>) -> CmSolution {
    match next {
        Some(next) if next > current => CmSolution::Acute,
        _ => CmSolution::Obtuse,
    }
}

/// CM angle [rad] from its sine and the chosen solution.
pub fn cm_angle(sine: f64, solution: CmSolution) -> f64 {
    let acute = sine.clamp(-1.0, 1.0).asin();
    match solution {
        CmSolution::Acute => acute,
        CmSolution::Obtuse => PI - acute,
    }
}

/// Sweep inputs for one particle, in f64 for the trigonometry.
#[derive(Debug, Clone, Copy)]
struct Particle {
    total_energy: f64,
    scale: f64,
    ratio: f64,
    max_angle: f64,
}

impl Particle {
    fn energy(&self, theta: f64, branch: Branch) -> Option<f64> {
        branch_energy(self.total_energy, self.scale, self.ratio, theta, branch)
    }
}

/// A grid angle with its computed lab energy.
#[derive(Debug, Clone, Copy)]
struct BranchPoint {
    index: usize,
    angle_deg: f64,
    angle_rad: f64,
    energy: f64,
}

fn sweep_point(
    particle: &Particle,
    index: usize,
    steps_per_degree: u32,
    branch: Branch,
    config: &SweepConfig,
) -> Option<BranchPoint> {
    let angle_deg = index as f64 / steps_per_degree as f64;
    let angle_rad = config.deg_to_rad(angle_deg);
    if angle_rad > particle.max_angle {
        return None;
    }
    let energy = particle.energy(angle_rad, branch)?;
    if energy < config.energy_cutoff {
        return None;
    }
    Some(BranchPoint {
        index,
        angle_deg,
        angle_rad,
        energy,
    })
}

/// Ascending sweep of the `+` root over the fine grid.
fn forward_branch(particle: &Particle, config: &SweepConfig) -> Vec<BranchPoint> {
    (0..config.forward_points())
        .filter_map(|i| {
            sweep_point(particle, i, config.forward_steps_per_degree, Branch::Forward, config)
        })
        .collect()
}

/// Descending sweep of the `−` root; empty for an unbounded particle.
fn backward_branch(particle: &Particle, config: &SweepConfig) -> Vec<BranchPoint> {
    if particle.max_angle >= PI {
        return Vec::new();
    }
    (0..config.backward_points())
        .rev()
        .filter_map(|i| {
            sweep_point(particle, i, config.backward_steps_per_degree, Branch::Backward, config)
        })
        .collect()
}

fn energy_series(
    forward: &[BranchPoint],
    backward: &[BranchPoint],
    mass_amu: f64,
    config: &SweepConfig,
) -> ParticleSeries {
    let points = forward.iter().chain(backward).map(|p| SeriesPoint {
        x: p.angle_deg,
        y: round_half_up(p.energy, config.rounding_decimals),
    });
    ParticleSeries::from_points(points, mass_amu)
}

/// Light-particle output of the sweep.
struct LightSweep {
    series: ParticleSeries,
    cm_angle: AngleEnergySeries,
    heavy_angle: AngleEnergySeries,
    table: Vec<KinematicTableRow>,
}

/// Exit-channel quantities the light sweep needs besides the particle itself.
#[derive(Debug, Clone, Copy)]
struct Companion {
    total_energy: Decimal,
    /// `E_t · D`, normalizes `sin θ_cm`.
    cm_norm: f64,
    /// `m_light / m_heavy`.
    mass_ratio: f64,
    mass_amu: f64,
}

fn light_sweep(particle: &Particle, companion: &Companion, config: &SweepConfig) -> LightSweep {
    let forward = forward_branch(particle, config);
    let backward = backward_branch(particle, config);
    let series = energy_series(&forward, &backward, companion.mass_amu, config);

    let decimals = config.rounding_decimals;
    let step = config.finite_difference_step_rad;
    let mut cm_series = Vec::with_capacity(forward.len());
    let mut heavy_angle = Vec::with_capacity(forward.len());
    let mut table = Vec::new();

    for point in &forward {
        let theta = point.angle_rad;
        let sine_here = (point.energy / companion.cm_norm).sqrt() * theta.sin();
        let sine_next = particle
            .energy(theta + step, Branch::Forward)
            .map(|e| (e / companion.cm_norm).sqrt() * (theta + step).sin());
        let cm_rad = cm_angle(sine_here, select_cm_solution(sine_here, sine_next));

        let recoil_energy = Decimal::from_f64(point.energy)
            .map(|e| companion.total_energy - e)
            .and_then(|e| e.to_f64())
            .unwrap_or(0.0);
        let recoil_rad = if recoil_energy > 0.0 {
            ((companion.mass_ratio * point.energy / recoil_energy).sqrt() * theta.sin())
                .clamp(-1.0, 1.0)
                .asin()
        } else {
            0.0
        };

        let cm_deg = round_half_up(config.rad_to_deg(cm_rad), decimals);
        let recoil_deg = round_half_up(config.rad_to_deg(recoil_rad), decimals);
        let recoil_cm_deg = round_half_up(config.rad_to_deg(PI - cm_rad), decimals);

        cm_series.push(SeriesPoint {
            x: point.angle_deg,
            y: cm_deg,
        });
        heavy_angle.push(SeriesPoint {
            x: recoil_deg,
            y: point.angle_deg,
        });

        let on_integer_degree = point.index % config.forward_steps_per_degree as usize == 0;
        if on_integer_degree && recoil_energy >= config.energy_cutoff {
            table.push(KinematicTableRow {
                id: point.index + 1,
                lab_angle: point.angle_deg,
                cm_angle: cm_deg,
                lab_energy: round_half_up(point.energy, decimals),
                recoil_lab_angle: recoil_deg,
                recoil_cm_angle: recoil_cm_deg,
                recoil_lab_energy: round_half_up(recoil_energy, decimals),
            });
        }
    }

    LightSweep {
        series,
        cm_angle: cm_series,
        heavy_angle,
        table,
    }
}

fn heavy_sweep(particle: &Particle, mass_amu: f64, config: &SweepConfig) -> ParticleSeries {
    let forward = forward_branch(particle, config);
    let backward = backward_branch(particle, config);
    energy_series(&forward, &backward, mass_amu, config)
}

fn as_f64(name: &'static str, value: Decimal) -> KinematicsResult<f64> {
    value
        .to_f64()
        .ok_or(KinematicsError::NoKinematicSolution { factor: name, value })
}

/// Sweep both particles over the lab-angle grid.
pub fn generate_tables(
    reaction: &Reaction,
    factors: &KinematicFactors,
    config: &SweepConfig,
) -> KinematicsResult<KinematicTables> {
    let total_energy = as_f64("total_energy", factors.total_energy)?;
    let light = Particle {
        total_energy,
        scale: as_f64("b", factors.b)?,
        ratio: factors.light_ratio(),
        max_angle: factors.light_max_angle,
    };
    let heavy = Particle {
        total_energy,
        scale: as_f64("a", factors.a)?,
        ratio: factors.heavy_ratio(),
        max_angle: factors.heavy_max_angle,
    };
    let mass_ratio = reaction
        .light()
        .mass
        .checked_div(reaction.heavy().mass)
        .and_then(|r| r.to_f64())
        .ok_or_else(|| KinematicsError::InvalidNuclide("heavy rest mass is zero".to_string()))?;
    let companion = Companion {
        total_energy: factors.total_energy,
        cm_norm: total_energy * as_f64("d", factors.d)?,
        mass_ratio,
        mass_amu: reaction.light().mass_amu,
    };
    let heavy_amu = reaction.heavy().mass_amu;

    let (light_out, heavy_series) = if config.parallel_branches {
        rayon::join(
            || light_sweep(&light, &companion, config),
            || heavy_sweep(&heavy, heavy_amu, config),
        )
    } else {
        (
            light_sweep(&light, &companion, config),
            heavy_sweep(&heavy, heavy_amu, config),
        )
    };

    Ok(KinematicTables {
        light: light_out.series,
        heavy: heavy_series,
        light_cm_angle: light_out.cm_angle,
        light_heavy_angle: light_out.heavy_angle,
        table: light_out.table,
    })
}
