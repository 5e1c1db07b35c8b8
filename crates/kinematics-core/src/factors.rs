// ─────────────────────────────────────────────────────────────────────
// SCPN Reaction Kinematics — Kinematic Factors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Kinematic factors A, B, C, D and maximum lab emission angles.
//!
//! With `M = (m_beam + m_target)(m_light + m_heavy)` and `E_t = E_beam + Q`:
//!
//! ```text
//! A = m_beam m_heavy E_beam / (M E_t)
//! B = m_beam m_light E_beam / (M E_t)
//! C = m_target m_light (1 + m_beam Q / (m_target E_t)) / M
//! D = m_target m_heavy (1 + m_beam Q / (m_target E_t)) / M
//! ```
//!
//! The light particle's lab energy at lab angle θ is
//! `E_t B (cos θ ± sqrt(D/B − sin² θ))²`, and likewise for the heavy
//! particle with A and C. When `B > D` the light particle is confined to
//! `θ ≤ asin(sqrt(D/B))` and both signs are physical.

use kinematics_types::error::{KinematicsError, KinematicsResult};
use kinematics_types::reaction::Reaction;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::f64::consts::PI;

/// Output of the factor solver. Energies in MeV, angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KinematicFactors {
    pub a: Decimal,
    pub b: Decimal,
    pub c: Decimal,
    pub d: Decimal,
    pub beam_energy: Decimal,
    pub q_value: Decimal,
    /// `E_beam + Q`.
    pub total_energy: Decimal,
    /// Largest lab angle of the light particle; `π` when unbounded.
    pub light_max_angle: f64,
    /// Largest lab angle of the heavy particle; `π` when unbounded.
    pub heavy_max_angle: f64,
}

impl KinematicFactors {
    /// `D/B`, the discriminant offset of the light-particle quadratic.
    pub fn light_ratio(&self) -> f64 {
        decimal_ratio(self.d, self.b)
    }

    /// `C/A`, the discriminant offset of the heavy-particle quadratic.
    pub fn heavy_ratio(&self) -> f64 {
        decimal_ratio(self.c, self.a)
    }

    /// Two lab energies per lab angle for the light particle.
    pub fn light_double_valued(&self) -> bool {
        self.light_max_angle < PI
    }

    /// Two lab energies per lab angle for the heavy particle.
    pub fn heavy_double_valued(&self) -> bool {
        self.heavy_max_angle < PI
    }
}

fn decimal_ratio(num: Decimal, den: Decimal) -> f64 {
    num.checked_div(den)
        .and_then(|r| r.to_f64())
        .unwrap_or(f64::INFINITY)
}

/// `asin(sqrt(num/den))` if `den > num`, otherwise `π`.
pub fn max_emission_angle(num: Decimal, den: Decimal) -> f64 {
    if den > num {
        decimal_ratio(num, den).sqrt().clamp(0.0, 1.0).asin()
    } else {
        PI
    }
}

fn require_positive(factor: &'static str, value: Decimal) -> KinematicsResult<Decimal> {
    if value <= Decimal::ZERO {
        return Err(KinematicsError::NoKinematicSolution { factor, value });
    }
    Ok(value)
}

fn divide(factor: &'static str, num: Decimal, den: Decimal) -> KinematicsResult<Decimal> {
    num.checked_div(den)
        .ok_or(KinematicsError::NoKinematicSolution {
            factor,
            value: Decimal::ZERO,
        })
}

/// Solve the factors from rest masses [MeV], beam energy and Q-value.
pub fn solve_factors_from_masses(
    m_beam: Decimal,
    m_target: Decimal,
    m_light: Decimal,
    m_heavy: Decimal,
    beam_energy: Decimal,
    q_value: Decimal,
) -> KinematicsResult<KinematicFactors> {
    let mass_factor = (m_beam + m_target) * (m_light + m_heavy);
    let total_energy = beam_energy + q_value;
    let energy_denominator = mass_factor * total_energy;

    let a = divide("a", m_beam * m_heavy * beam_energy, energy_denominator)?;
    let b = divide("b", m_beam * m_light * beam_energy, energy_denominator)?;

    let q_term = Decimal::ONE + divide("c", m_beam * q_value, m_target * total_energy)?;
    let c = divide("c", m_target * m_light * q_term, mass_factor)?;
    let d = divide("d", m_target * m_heavy * q_term, mass_factor)?;

    let a = require_positive("a", a)?;
    let b = require_positive("b", b)?;
    let c = require_positive("c", c)?;
    let d = require_positive("d", d)?;

    Ok(KinematicFactors {
        a,
        b,
        c,
        d,
        beam_energy,
        q_value,
        total_energy,
        light_max_angle: max_emission_angle(d, b),
        heavy_max_angle: max_emission_angle(c, a),
    })
}

/// Solve the factors for a reaction using ground-state rest masses.
pub fn solve_factors(
    reaction: &Reaction,
    beam_energy: Decimal,
    q_value: Decimal,
) -> KinematicsResult<KinematicFactors> {
    solve_factors_from_masses(
        reaction.beam().mass,
        reaction.target().mass,
        reaction.light().mass,
        reaction.heavy().mass,
        beam_energy,
        q_value,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const M_P: Decimal = dec!(938.27208816);
    const M_D: Decimal = dec!(1875.61294257);
    const M_T: Decimal = dec!(2808.92113298);

    #[test]
    fn test_dd_p_factors_positive() {
        let f = solve_factors_from_masses(M_D, M_D, M_P, M_T, dec!(5), dec!(4.032664)).unwrap();
        for value in [f.a, f.b, f.c, f.d] {
            assert!(value > Decimal::ZERO);
        }
        assert_eq!(f.total_energy, dec!(9.032664));
        // Light proton against a heavier triton: no forward-cone limit.
        assert_eq!(f.light_max_angle, PI);
        assert!(!f.light_double_valued());
        // The triton recoil is confined to a forward cone.
        assert!(f.heavy_double_valued());
        let expected = (f.heavy_ratio()).sqrt().asin();
        assert!((f.heavy_max_angle - expected).abs() < 1e-12);
    }

    #[test]
    fn test_factors_sum_to_one() {
        // A + B + C + D = 1 identically (energy conservation in the CM frame).
        let f = solve_factors_from_masses(M_D, M_D, M_P, M_T, dec!(5), dec!(4.032664)).unwrap();
        let sum = f.a + f.b + f.c + f.d;
        assert!((sum - Decimal::ONE).abs() < dec!(0.0000000001), "sum = {sum}");
    }

    #[test]
    fn test_elastic_inverse_kinematics_bounded() {
        // 1H(d, d)p elastic: B/D = (m_d/m_p)², light max angle = asin(m_p/m_d) ≈ 30°.
        let f = solve_factors_from_masses(M_D, M_P, M_D, M_P, dec!(10), Decimal::ZERO).unwrap();
        assert!(f.light_double_valued());
        let expected = (M_P / M_D).to_f64().unwrap().asin();
        assert!((f.light_max_angle - expected).abs() < 1e-12);
        assert!((f.light_max_angle.to_degrees() - 30.0).abs() < 0.1);
        // A == C for elastic scattering, so the recoil reaches at least 90°.
        assert!(f.heavy_max_angle >= PI / 2.0 - 1e-6);
    }

    #[test]
    fn test_zero_total_energy_has_no_solution() {
        let err = solve_factors_from_masses(M_D, M_D, M_P, M_T, dec!(1), dec!(-1)).unwrap_err();
        assert!(matches!(err, KinematicsError::NoKinematicSolution { .. }));
    }

    #[test]
    fn test_negative_total_energy_has_no_solution() {
        let err = solve_factors_from_masses(M_D, M_D, M_P, M_T, dec!(1), dec!(-2)).unwrap_err();
        match err {
            KinematicsError::NoKinematicSolution { factor, value } => {
                assert_eq!(factor, "a");
                assert!(value <= Decimal::ZERO);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_max_emission_angle_rule() {
        assert_eq!(max_emission_angle(dec!(1), dec!(1)), PI);
        assert_eq!(max_emission_angle(dec!(2), dec!(1)), PI);
        let angle = max_emission_angle(dec!(1), dec!(4));
        assert!((angle - 0.5f64.asin()).abs() < 1e-15);
    }
}
