// ─────────────────────────────────────────────────────────────────────
// SCPN Reaction Kinematics — Orchestrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Input validation and the energetics → factors → tables pipeline.

use crate::energetics::compute_energetics;
use crate::factors::solve_factors;
use crate::table::{generate_tables, AngleEnergySeries, KinematicTableRow, TableColumn, KINEMATIC_COLUMNS};
use kinematics_types::config::SweepConfig;
use kinematics_types::error::{KinematicsError, KinematicsResult};
use kinematics_types::nuclide::Nuclide;
use kinematics_types::reaction::{BeamEnergy, Reaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Caller input; any nuclide may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KinematicsRequest {
    pub beam: Option<Nuclide>,
    pub target: Option<Nuclide>,
    pub light: Option<Nuclide>,
    pub heavy: Option<Nuclide>,
    /// Beam kinetic energy [MeV], a number or a numeric string.
    pub beam_energy: BeamEnergy,
}

/// Complete kinematics of one reaction, ready for charting and tabulation.
///
/// Energies in MeV, max angles in radians, series and table angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KinematicsReport {
    pub reaction_notation: String,
    pub cm_energy: Decimal,
    pub gs_q_value: Decimal,
    pub q_value: Decimal,
    pub beam_energy: Decimal,
    pub a_factor: Decimal,
    pub b_factor: Decimal,
    pub c_factor: Decimal,
    pub d_factor: Decimal,
    pub total_energy: Decimal,
    pub light_max_angle: f64,
    pub heavy_max_angle: f64,
    /// Light lab energy per nucleon vs lab angle (both branches).
    pub light_angle_lab_energy_lab: AngleEnergySeries,
    /// Heavy lab energy per nucleon vs lab angle (both branches).
    pub heavy_angle_lab_energy_lab: AngleEnergySeries,
    /// Light lab angle (y) vs recoil lab angle (x).
    pub light_angle_lab_heavy_angle_lab: AngleEnergySeries,
    pub light_angle_lab_angle_cm: AngleEnergySeries,
    /// Raw light lab energy vs lab angle.
    pub light_energy_lab: AngleEnergySeries,
    /// Raw heavy lab energy vs lab angle.
    pub heavy_energy_lab: AngleEnergySeries,
    pub kinematic_columns: Vec<TableColumn>,
    pub kinematic_table: Vec<KinematicTableRow>,
}

impl KinematicsReport {
    pub fn to_json(&self) -> KinematicsResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn require(nuclide: Option<&Nuclide>, role: &'static str) -> KinematicsResult<Nuclide> {
    nuclide.cloned().ok_or(KinematicsError::MissingInput { role })
}

/// Validate a request and run the full pipeline.
pub fn compute_kinematics(
    request: &KinematicsRequest,
    config: &SweepConfig,
) -> KinematicsResult<KinematicsReport> {
    let result = validate_request(request).and_then(|reaction| compute_reaction(&reaction, config));
    if let Err(err) = &result {
        log::warn!("kinematics request rejected: {err}");
    }
    result
}

fn validate_request(request: &KinematicsRequest) -> KinematicsResult<Reaction> {
    let beam = require(request.beam.as_ref(), "beam")?;
    let target = require(request.target.as_ref(), "target")?;
    let light = require(request.light.as_ref(), "light")?;
    let heavy = require(request.heavy.as_ref(), "heavy")?;
    let beam_energy = request.beam_energy.resolve()?;
    Reaction::new(beam, target, light, heavy, beam_energy)
}

/// Run energetics, factors and the sweep for an already balanced reaction.
pub fn compute_reaction(
    reaction: &Reaction,
    config: &SweepConfig,
) -> KinematicsResult<KinematicsReport> {
    config.validate()?;
    let label = reaction.label();

    let energetics = compute_energetics(reaction)?;
    log::debug!(
        "{label}: E_cm={} Q_gs={} Q={}",
        energetics.cm_energy,
        energetics.gs_q_value,
        energetics.q_value
    );

    let factors = solve_factors(reaction, energetics.beam_energy, energetics.q_value)?;
    log::debug!(
        "{label}: A={} B={} C={} D={} E_t={} light_max={:.6} heavy_max={:.6}",
        factors.a,
        factors.b,
        factors.c,
        factors.d,
        factors.total_energy,
        factors.light_max_angle,
        factors.heavy_max_angle
    );

    let tables = generate_tables(reaction, &factors, config)?;
    log::debug!(
        "{label}: {} light points, {} heavy points, {} table rows",
        tables.light.energy.len(),
        tables.heavy.energy.len(),
        tables.table.len()
    );

    Ok(KinematicsReport {
        reaction_notation: label,
        cm_energy: energetics.cm_energy,
        gs_q_value: energetics.gs_q_value,
        q_value: factors.q_value,
        beam_energy: factors.beam_energy,
        a_factor: factors.a,
        b_factor: factors.b,
        c_factor: factors.c,
        d_factor: factors.d,
        total_energy: factors.total_energy,
        light_max_angle: factors.light_max_angle,
        heavy_max_angle: factors.heavy_max_angle,
        light_angle_lab_energy_lab: tables.light.energy_per_nucleon,
        heavy_angle_lab_energy_lab: tables.heavy.energy_per_nucleon,
        light_angle_lab_heavy_angle_lab: tables.light_heavy_angle,
        light_angle_lab_angle_cm: tables.light_cm_angle,
        light_energy_lab: tables.light.energy,
        heavy_energy_lab: tables.heavy.energy,
        kinematic_columns: KINEMATIC_COLUMNS.to_vec(),
        kinematic_table: tables.table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn nuclide(a: u32, z: u32, mass: Decimal, label: &str) -> Nuclide {
        Nuclide::new(a, z, mass, Decimal::ZERO, a as f64, label).unwrap()
    }

    fn dd_p_request() -> KinematicsRequest {
        let d = nuclide(2, 1, dec!(1875.61294257), "d");
        KinematicsRequest {
            beam: Some(d.clone()),
            target: Some(d),
            light: Some(nuclide(1, 1, dec!(938.27208816), "p")),
            heavy: Some(nuclide(3, 1, dec!(2808.92113298), "t")),
            beam_energy: BeamEnergy::from(5.0),
        }
    }

    #[test]
    fn test_missing_inputs_reported_by_role() {
        let config = SweepConfig::default();
        for role in ["beam", "target", "light", "heavy"] {
            let mut request = dd_p_request();
            match role {
                "beam" => request.beam = None,
                "target" => request.target = None,
                "light" => request.light = None,
                _ => request.heavy = None,
            }
            match compute_kinematics(&request, &config) {
                Err(KinematicsError::MissingInput { role: got }) => assert_eq!(got, role),
                other => panic!("expected MissingInput for {role}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_energy() {
        let config = SweepConfig::default();
        for energy in [0.0, -5.0, f64::NAN, f64::NEG_INFINITY] {
            let request = KinematicsRequest {
                beam_energy: energy.into(),
                ..dd_p_request()
            };
            assert!(matches!(
                compute_kinematics(&request, &config),
                Err(KinematicsError::InvalidEnergy(_))
            ));
        }
    }

    #[test]
    fn test_text_energy_is_parsed() {
        let request = KinematicsRequest {
            beam_energy: "5.0".into(),
            ..dd_p_request()
        };
        let report = compute_kinematics(&request, &SweepConfig::default()).unwrap();
        assert_eq!(report.beam_energy, dec!(5));

        for text in ["abc", "", "-1", "inf"] {
            let request = KinematicsRequest {
                beam_energy: text.into(),
                ..dd_p_request()
            };
            assert!(
                matches!(
                    compute_kinematics(&request, &SweepConfig::default()),
                    Err(KinematicsError::InvalidEnergy(_))
                ),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_energy_below_decimal_resolution_is_invalid() {
        let request = KinematicsRequest {
            beam_energy: BeamEnergy::from(1e-30),
            ..dd_p_request()
        };
        assert!(matches!(
            compute_kinematics(&request, &SweepConfig::default()),
            Err(KinematicsError::InvalidEnergy(_))
        ));
    }

    #[test]
    fn test_unbalanced_request_rejected() {
        let request = KinematicsRequest {
            heavy: Some(nuclide(3, 2, dec!(2808.39160743), "3He")),
            ..dd_p_request()
        };
        assert!(matches!(
            compute_kinematics(&request, &SweepConfig::default()),
            Err(KinematicsError::UnbalancedReaction { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SweepConfig {
            energy_cutoff: 0.0,
            ..SweepConfig::default()
        };
        assert!(matches!(
            compute_kinematics(&dd_p_request(), &config),
            Err(KinematicsError::ConfigError(_))
        ));
    }

    #[test]
    fn test_report_label_and_columns() {
        let report = compute_kinematics(&dd_p_request(), &SweepConfig::default()).unwrap();
        assert_eq!(report.reaction_notation, "d(d, p)t");
        assert_eq!(report.kinematic_columns.len(), 6);
        assert_eq!(report.total_energy, report.beam_energy + report.q_value);
    }

    #[test]
    fn test_report_serializes() {
        let report = compute_kinematics(&dd_p_request(), &SweepConfig::default()).unwrap();
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["reaction_notation"], "d(d, p)t");
        assert_eq!(value["kinematic_table"].as_array().map(Vec::len), Some(181));
        assert_eq!(value["kinematic_columns"][0]["selector"], "lab_angle");
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "beam": {"mass_number": 2, "atomic_number": 1, "mass": "1875.61294257", "mass_amu": 2.0, "simple_notation": "d"},
            "target": {"mass_number": 2, "atomic_number": 1, "mass": "1875.61294257", "mass_amu": 2.0, "simple_notation": "d"},
            "light": {"mass_number": 1, "atomic_number": 1, "mass": "938.27208816", "mass_amu": 1.0, "simple_notation": "p"},
            "beam_energy": 5.0
        }"#;
        let request: KinematicsRequest = serde_json::from_str(json).unwrap();
        assert!(request.heavy.is_none());
        assert!(matches!(
            compute_kinematics(&request, &SweepConfig::default()),
            Err(KinematicsError::MissingInput { role: "heavy" })
        ));
    }

    #[test]
    fn test_request_with_string_energy_from_json() {
        let d = r#"{"mass_number": 2, "atomic_number": 1, "mass": "1875.61294257", "mass_amu": 2.0, "simple_notation": "d"}"#;
        let p = r#"{"mass_number": 1, "atomic_number": 1, "mass": "938.27208816", "mass_amu": 1.0, "simple_notation": "p"}"#;
        let t = r#"{"mass_number": 3, "atomic_number": 1, "mass": "2808.92113298", "mass_amu": 3.0, "simple_notation": "t"}"#;
        let json = |energy: &str| {
            format!(r#"{{"beam": {d}, "target": {d}, "light": {p}, "heavy": {t}, "beam_energy": {energy}}}"#)
        };
        let config = SweepConfig::default();

        let request: KinematicsRequest = serde_json::from_str(&json(r#""5.0""#)).unwrap();
        let report = compute_kinematics(&request, &config).unwrap();
        assert_eq!(report.kinematic_table.len(), 181);

        let request: KinematicsRequest = serde_json::from_str(&json(r#""abc""#)).unwrap();
        assert!(matches!(
            compute_kinematics(&request, &config),
            Err(KinematicsError::InvalidEnergy(_))
        ));
    }
}
