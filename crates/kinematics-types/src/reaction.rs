// ─────────────────────────────────────────────────────────────────────
// SCPN Reaction Kinematics — Reaction
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Balanced two-body reaction `target(beam, light)heavy`.

use crate::constants::MAX_BEAM_ENERGY_MEV;
use crate::error::{KinematicsError, KinematicsResult};
use crate::nuclide::Nuclide;
use serde::{Deserialize, Serialize};

/// Beam on a stationary target producing a light ejectile and a heavy recoil.
///
/// Only constructible through [`Reaction::new`], so nucleon and charge
/// balance always hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reaction {
    beam: Nuclide,
    target: Nuclide,
    light: Nuclide,
    heavy: Nuclide,
    /// Beam kinetic energy [MeV].
    beam_energy: f64,
}

/// Nucleon and proton numbers left for the recoil: `beam + target - light`.
///
/// Signed, so a light particle heavier than the entrance channel shows up
/// as a negative count instead of wrapping.
pub fn recoil_numbers(beam: &Nuclide, target: &Nuclide, light: &Nuclide) -> (i64, i64) {
    let a = beam.mass_number as i64 + target.mass_number as i64 - light.mass_number as i64;
    let z = beam.atomic_number as i64 + target.atomic_number as i64 - light.atomic_number as i64;
    (a, z)
}

/// Beam energy must be finite, positive, and at most [`MAX_BEAM_ENERGY_MEV`].
pub fn check_beam_energy(beam_energy: f64) -> KinematicsResult<()> {
    if !beam_energy.is_finite() || beam_energy <= 0.0 {
        return Err(KinematicsError::InvalidEnergy(format!(
            "beam energy must be finite and > 0, got {beam_energy}"
        )));
    }
    if beam_energy > MAX_BEAM_ENERGY_MEV {
        return Err(KinematicsError::InvalidEnergy(format!(
            "beam energy {beam_energy} MeV exceeds {MAX_BEAM_ENERGY_MEV} MeV"
        )));
    }
    Ok(())
}

/// Parse a caller-supplied beam energy string [MeV].
pub fn parse_beam_energy(text: &str) -> KinematicsResult<f64> {
    let energy: f64 = text
        .trim()
        .parse()
        .map_err(|_| KinematicsError::InvalidEnergy(format!("not a number: {text:?}")))?;
    check_beam_energy(energy)?;
    Ok(energy)
}

/// Beam energy as supplied by a caller: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BeamEnergy {
    Number(f64),
    Text(String),
}

impl BeamEnergy {
    /// Numeric value [MeV]. Text goes through [`parse_beam_energy`]; range
    /// checks on numbers are left to [`Reaction::new`].
    pub fn resolve(&self) -> KinematicsResult<f64> {
        match self {
            BeamEnergy::Number(energy) => Ok(*energy),
            BeamEnergy::Text(text) => parse_beam_energy(text),
        }
    }
}

impl Default for BeamEnergy {
    fn default() -> Self {
        BeamEnergy::Number(0.0)
    }
}

impl From<f64> for BeamEnergy {
    fn from(energy: f64) -> Self {
        BeamEnergy::Number(energy)
    }
}

impl From<&str> for BeamEnergy {
    fn from(text: &str) -> Self {
        BeamEnergy::Text(text.to_string())
    }
}

impl Reaction {
    pub fn new(
        beam: Nuclide,
        target: Nuclide,
        light: Nuclide,
        heavy: Nuclide,
        beam_energy: f64,
    ) -> KinematicsResult<Self> {
        check_beam_energy(beam_energy)?;
        for nuclide in [&beam, &target, &light, &heavy] {
            nuclide.validate()?;
        }

        let (expected_a, expected_z) = recoil_numbers(&beam, &target, &light);
        if heavy.mass_number as i64 != expected_a || heavy.atomic_number as i64 != expected_z {
            return Err(KinematicsError::UnbalancedReaction {
                heavy_a: heavy.mass_number,
                heavy_z: heavy.atomic_number,
                expected_a,
                expected_z,
            });
        }

        Ok(Reaction {
            beam,
            target,
            light,
            heavy,
            beam_energy,
        })
    }

    pub fn beam(&self) -> &Nuclide {
        &self.beam
    }

    pub fn target(&self) -> &Nuclide {
        &self.target
    }

    pub fn light(&self) -> &Nuclide {
        &self.light
    }

    pub fn heavy(&self) -> &Nuclide {
        &self.heavy
    }

    pub fn beam_energy(&self) -> f64 {
        self.beam_energy
    }

    /// Standard notation, e.g. `2H(d, p)3H`.
    pub fn label(&self) -> String {
        format!(
            "{}({}, {}){}",
            self.target.simple_notation,
            self.beam.simple_notation,
            self.light.simple_notation,
            self.heavy.simple_notation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn nuclide(a: u32, z: u32, mass: Decimal, label: &str) -> Nuclide {
        Nuclide::new(a, z, mass, Decimal::ZERO, a as f64, label).unwrap()
    }

    fn d() -> Nuclide {
        nuclide(2, 1, dec!(1875.61294257), "d")
    }
    fn p() -> Nuclide {
        nuclide(1, 1, dec!(938.27208816), "p")
    }
    fn t() -> Nuclide {
        nuclide(3, 1, dec!(2808.92113298), "t")
    }

    #[test]
    fn test_balanced_reaction_and_label() {
        let target = Nuclide {
            simple_notation: "2H".to_string(),
            ..d()
        };
        let heavy = Nuclide {
            simple_notation: "3H".to_string(),
            ..t()
        };
        let reaction = Reaction::new(d(), target, p(), heavy, 5.0).unwrap();
        assert_eq!(reaction.label(), "2H(d, p)3H");
        assert_eq!(reaction.beam_energy(), 5.0);
    }

    #[test]
    fn test_unbalanced_mass_number() {
        let err = Reaction::new(d(), d(), p(), d(), 5.0).unwrap_err();
        match err {
            KinematicsError::UnbalancedReaction {
                expected_a,
                expected_z,
                ..
            } => {
                assert_eq!(expected_a, 3);
                assert_eq!(expected_z, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unbalanced_charge() {
        let he3 = nuclide(3, 2, dec!(2808.39160743), "3He");
        assert!(matches!(
            Reaction::new(d(), d(), p(), he3, 5.0),
            Err(KinematicsError::UnbalancedReaction { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_beam_energy() {
        for energy in [0.0, -1.0, f64::NAN, f64::INFINITY, 2.0e6] {
            assert!(matches!(
                Reaction::new(d(), d(), p(), t(), energy),
                Err(KinematicsError::InvalidEnergy(_))
            ));
        }
    }

    #[test]
    fn test_parse_beam_energy() {
        assert_eq!(parse_beam_energy(" 5.0 ").unwrap(), 5.0);
        assert_eq!(parse_beam_energy("12").unwrap(), 12.0);
        for text in ["", "abc", "-3", "0", "NaN", "inf"] {
            assert!(
                matches!(parse_beam_energy(text), Err(KinematicsError::InvalidEnergy(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_beam_energy_accepts_number_or_text() {
        let number: BeamEnergy = serde_json::from_str("5").unwrap();
        let text: BeamEnergy = serde_json::from_str(r#"" 5.0 ""#).unwrap();
        assert_eq!(number.resolve().unwrap(), 5.0);
        assert_eq!(text.resolve().unwrap(), 5.0);

        let garbage: BeamEnergy = serde_json::from_str(r#""abc""#).unwrap();
        assert!(matches!(garbage.resolve(), Err(KinematicsError::InvalidEnergy(_))));
    }

    #[test]
    fn test_recoil_numbers_can_go_negative() {
        let alpha = nuclide(4, 2, dec!(3727.3794066), "a");
        assert_eq!(recoil_numbers(&p(), &p(), &alpha), (-2, 0));
    }
}
