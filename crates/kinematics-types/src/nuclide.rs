// ─────────────────────────────────────────────────────────────────────
// SCPN Reaction Kinematics — Nuclide
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::MAX_REST_MASS_MEV;
use crate::error::{KinematicsError, KinematicsResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One participant of a two-body reaction, as supplied by the isotope service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nuclide {
    /// Nucleon number A.
    pub mass_number: u32,
    /// Proton number Z.
    pub atomic_number: u32,
    /// Ground-state rest mass [MeV].
    pub mass: Decimal,
    /// Excitation energy above the ground state [MeV].
    #[serde(default)]
    pub excited_state: Decimal,
    /// Per-nucleon normalization used for the plotted energy series.
    pub mass_amu: f64,
    /// Short label, e.g. "2H" or "p".
    pub simple_notation: String,
}

impl Nuclide {
    /// Build and validate a nuclide record.
    pub fn new(
        mass_number: u32,
        atomic_number: u32,
        mass: Decimal,
        excited_state: Decimal,
        mass_amu: f64,
        simple_notation: impl Into<String>,
    ) -> KinematicsResult<Self> {
        let nuclide = Nuclide {
            mass_number,
            atomic_number,
            mass,
            excited_state,
            mass_amu,
            simple_notation: simple_notation.into(),
        };
        nuclide.validate()?;
        Ok(nuclide)
    }

    /// Checks A ≥ Z, A > 0, 0 < mass ≤ MAX_REST_MASS_MEV, 0 ≤ excitation ≤ mass.
    ///
    /// `mass_amu` is checked on its own: it only scales plotted series and is
    /// never derived from `mass` or `mass_number`.
    pub fn validate(&self) -> KinematicsResult<()> {
        if self.mass_number == 0 {
            return Err(KinematicsError::InvalidNuclide(format!(
                "{}: mass number must be positive",
                self.simple_notation
            )));
        }
        if self.atomic_number > self.mass_number {
            return Err(KinematicsError::InvalidNuclide(format!(
                "{}: Z={} exceeds A={}",
                self.simple_notation, self.atomic_number, self.mass_number
            )));
        }
        if self.mass <= Decimal::ZERO {
            return Err(KinematicsError::InvalidNuclide(format!(
                "{}: rest mass must be positive, got {}",
                self.simple_notation, self.mass
            )));
        }
        if self.mass > Decimal::from(MAX_REST_MASS_MEV) {
            return Err(KinematicsError::InvalidNuclide(format!(
                "{}: rest mass {} exceeds {} MeV",
                self.simple_notation, self.mass, MAX_REST_MASS_MEV
            )));
        }
        if self.excited_state < Decimal::ZERO || self.excited_state > self.mass {
            return Err(KinematicsError::InvalidNuclide(format!(
                "{}: excitation energy must lie in [0, mass], got {}",
                self.simple_notation, self.excited_state
            )));
        }
        if !self.mass_amu.is_finite() || self.mass_amu <= 0.0 {
            return Err(KinematicsError::InvalidNuclide(format!(
                "{}: per-nucleon normalization must be finite and > 0, got {}",
                self.simple_notation, self.mass_amu
            )));
        }
        Ok(())
    }

    /// Same nuclide at a different excitation energy.
    pub fn with_excitation(&self, excited_state: Decimal) -> KinematicsResult<Self> {
        let nuclide = Nuclide {
            excited_state,
            ..self.clone()
        };
        nuclide.validate()?;
        Ok(nuclide)
    }

    /// Rest mass plus excitation [MeV].
    pub fn total_mass(&self) -> Decimal {
        self.mass + self.excited_state
    }
}
