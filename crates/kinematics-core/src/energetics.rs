// ─────────────────────────────────────────────────────────────────────
// SCPN Reaction Kinematics — Energetics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! CM energy and Q-values.
//!
//! All sums and differences run in `Decimal`: a Q-value is the small
//! difference of two rest-mass sums of several GeV each.

use kinematics_types::error::{KinematicsError, KinematicsResult};
use kinematics_types::nuclide::Nuclide;
use kinematics_types::reaction::Reaction;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Reaction energetics [MeV].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Energetics {
    /// Beam energy as a decimal.
    pub beam_energy: Decimal,
    /// Kinetic energy available in the CM frame.
    pub cm_energy: Decimal,
    /// Q-value between ground states.
    pub gs_q_value: Decimal,
    /// Q-value corrected for all four excitation energies.
    pub q_value: Decimal,
}

/// Beam energy f64 → Decimal; energies that vanish at decimal resolution are rejected.
pub fn beam_energy_decimal(beam_energy: f64) -> KinematicsResult<Decimal> {
    Decimal::from_f64(beam_energy)
        .filter(|energy| *energy > Decimal::ZERO)
        .ok_or_else(|| {
            KinematicsError::InvalidEnergy(format!(
                "{beam_energy} is not representable as a positive decimal"
            ))
        })
}

/// `E_beam · m_target / (m_beam + m_target)`.
pub fn cm_energy(beam: &Nuclide, target: &Nuclide, beam_energy: Decimal) -> KinematicsResult<Decimal> {
    (beam_energy * target.mass)
        .checked_div(beam.mass + target.mass)
        .ok_or_else(|| {
            KinematicsError::InvalidNuclide("beam and target masses sum to zero".to_string())
        })
}

/// `(m_beam + m_target) − (m_light + m_heavy)`.
pub fn ground_state_q(beam: &Nuclide, target: &Nuclide, light: &Nuclide, heavy: &Nuclide) -> Decimal {
    (beam.mass + target.mass) - (light.mass + heavy.mass)
}

/// Ground-state Q shifted by the excitation energies of all four nuclides.
pub fn reaction_q(beam: &Nuclide, target: &Nuclide, light: &Nuclide, heavy: &Nuclide) -> Decimal {
    (beam.total_mass() + target.total_mass()) - (light.total_mass() + heavy.total_mass())
}

/// Energetics of a reaction; fails when `E_cm + Q < 0`.
pub fn compute_energetics(reaction: &Reaction) -> KinematicsResult<Energetics> {
    let (beam, target, light, heavy) = (
        reaction.beam(),
        reaction.target(),
        reaction.light(),
        reaction.heavy(),
    );
    let beam_energy = beam_energy_decimal(reaction.beam_energy())?;
    let cm_energy = cm_energy(beam, target, beam_energy)?;
    let gs_q_value = ground_state_q(beam, target, light, heavy);
    let q_value = reaction_q(beam, target, light, heavy);

    if cm_energy + q_value < Decimal::ZERO {
        return Err(KinematicsError::EnergeticallyForbidden { cm_energy, q_value });
    }

    Ok(Energetics {
        beam_energy,
        cm_energy,
        gs_q_value,
        q_value,
    })
}
