// ─────────────────────────────────────────────────────────────────────
// SCPN Reaction Kinematics — Recoil Composer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Heavy-recoil identification from nucleon and charge balance.

use kinematics_types::error::{KinematicsError, KinematicsResult};
use kinematics_types::nuclide::Nuclide;
use kinematics_types::reaction::recoil_numbers;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Source of nuclide records keyed by (A, Z, excitation [MeV]).
pub trait IsotopeService {
    fn nuclide(&self, mass_number: u32, atomic_number: u32, excited_state: Decimal) -> Option<Nuclide>;
}

/// Resolve the heavy recoil left by `target(beam, light)`.
pub fn compose_heavy_recoil<S: IsotopeService + ?Sized>(
    service: &S,
    beam: &Nuclide,
    target: &Nuclide,
    light: &Nuclide,
    heavy_excitation: Decimal,
) -> KinematicsResult<Nuclide> {
    let (a, z) = recoil_numbers(beam, target, light);
    if a < 0 || z < 0 {
        return Err(KinematicsError::InvalidRecoil {
            mass_number: a,
            atomic_number: z,
        });
    }
    if heavy_excitation < Decimal::ZERO {
        return Err(KinematicsError::InvalidNuclide(format!(
            "recoil excitation must be >= 0, got {heavy_excitation}"
        )));
    }
    let (a, z) = (a as u32, z as u32);
    if let Some(heavy) = service.nuclide(a, z, heavy_excitation) {
        return Ok(heavy);
    }
    // A known ground state means the excitation itself was refused.
    if let Some(ground) = service.nuclide(a, z, Decimal::ZERO) {
        ground.with_excitation(heavy_excitation)?;
    }
    Err(KinematicsError::UnknownNuclide {
        mass_number: a,
        atomic_number: z,
    })
}

/// In-memory ground-state table implementing [`IsotopeService`].
#[derive(Debug, Clone, Default)]
pub struct NuclideTable {
    entries: HashMap<(u32, u32), Nuclide>,
}

#[derive(Debug, Deserialize)]
struct NuclideTableFile {
    nuclides: Vec<Nuclide>,
}

impl NuclideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a validated ground-state record, replacing any previous (A, Z) entry.
    pub fn insert(&mut self, nuclide: Nuclide) -> KinematicsResult<()> {
        nuclide.validate()?;
        let ground = Nuclide {
            excited_state: Decimal::ZERO,
            ..nuclide
        };
        self.entries
            .insert((ground.mass_number, ground.atomic_number), ground);
        Ok(())
    }

    /// Parse `{"nuclides": [ ... ]}`.
    pub fn from_json_str(json: &str) -> KinematicsResult<Self> {
        let file: NuclideTableFile = serde_json::from_str(json)?;
        let mut table = Self::new();
        for nuclide in file.nuclides {
            table.insert(nuclide)?;
        }
        Ok(table)
    }

    pub fn from_file(path: &str) -> KinematicsResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IsotopeService for NuclideTable {
    fn nuclide(&self, mass_number: u32, atomic_number: u32, excited_state: Decimal) -> Option<Nuclide> {
        if mass_number == 0 {
            return None;
        }
        self.entries
            .get(&(mass_number, atomic_number))
            .and_then(|ground| ground.with_excitation(excited_state).ok())
    }
}
