// Impact Model - closed-form impact energetics and scaling laws
// Pi-scaling crater estimate plus thermal, blast, and seismic reach

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::entry_sim::BODY_DENSITY;

/// Joules per megaton of TNT.
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

// =============================================================================
// RESULT TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestructionLevel {
    Local,
    #[serde(rename = "City-Wide")]
    CityWide,
    Regional,
    Continental,
    #[serde(rename = "Extinction Level")]
    ExtinctionLevel,
}

impl DestructionLevel {
    pub fn label(&self) -> &'static str {
        match self {
            DestructionLevel::Local => "Local",
            DestructionLevel::CityWide => "City-Wide",
            DestructionLevel::Regional => "Regional",
            DestructionLevel::Continental => "Continental",
            DestructionLevel::ExtinctionLevel => "Extinction Level",
        }
    }

    /// Categorize an impact by its yield in megatons.
    pub fn from_energy_mt(energy_mt: f64) -> Self {
        if energy_mt > 1000.0 {
            DestructionLevel::ExtinctionLevel
        } else if energy_mt > 100.0 {
            DestructionLevel::Continental
        } else if energy_mt > 10.0 {
            DestructionLevel::Regional
        } else if energy_mt > 1.0 {
            DestructionLevel::CityWide
        } else {
            DestructionLevel::Local
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactResult {
    pub mass_kg: f64,
    pub velocity_km_s: f64,
    pub kinetic_energy_j: f64,
    pub energy_mt: f64,
    pub crater_diameter_km: f64,
    pub thermal_radius_km: f64,
    pub blast_radius_km: f64,
    pub seismic_magnitude: f64,
    pub destruction_level: DestructionLevel,
}

// =============================================================================
// IMPACT COMPUTATION
// =============================================================================

/// Closed-form impact energetics for a uniform sphere of the standard body
/// density. Zero diameter or velocity yields a zeroed `Local` result, never
/// a NaN.
pub fn compute_impact(diameter_km: f64, velocity_km_s: f64) -> ImpactResult {
    let radius_m = diameter_km * 1000.0 / 2.0;
    let mass_kg = (4.0 / 3.0) * PI * radius_m.powi(3) * BODY_DENSITY;

    let velocity_m_s = velocity_km_s * 1000.0;
    let kinetic_energy_j = 0.5 * mass_kg * velocity_m_s * velocity_m_s;
    let energy_mt = kinetic_energy_j / JOULES_PER_MEGATON;

    // Pi-scaling approximation for a hard-rock target.
    let crater_diameter_km = 0.9 * kinetic_energy_j.powf(0.29) * 0.001;
    let thermal_radius_km = energy_mt.powf(0.41) * 3.0;
    let blast_radius_km = energy_mt.cbrt() * 5.0;
    let seismic_magnitude = if kinetic_energy_j > 0.0 {
        0.67 * kinetic_energy_j.log10() - 5.87
    } else {
        0.0
    };

    ImpactResult {
        mass_kg,
        velocity_km_s,
        kinetic_energy_j,
        energy_mt,
        crater_diameter_km,
        thermal_radius_km,
        blast_radius_km,
        seismic_magnitude,
        destruction_level: DestructionLevel::from_energy_mt(energy_mt),
    }
}

// =============================================================================
// PREVENTION EFFECTIVENESS CATALOG
// =============================================================================

/// Static reference entry for one deflection strategy. Consumed by hazard
/// reporting; nothing here is computed.
#[derive(Debug, Clone, Serialize)]
pub struct PreventionMethod {
    pub method: &'static str,
    pub effectiveness_percent: f64,
    pub lead_time_years: f64,
    /// NASA technology readiness level, 1-9.
    pub technology_readiness: u8,
    pub summary: &'static str,
}

const PREVENTION_METHODS: &[PreventionMethod] = &[
    PreventionMethod {
        method: "Kinetic Impactor",
        effectiveness_percent: 85.0,
        lead_time_years: 5.0,
        technology_readiness: 9,
        summary: "Spacecraft rams the body to transfer momentum; flight-proven by DART.",
    },
    PreventionMethod {
        method: "Gravity Tractor",
        effectiveness_percent: 60.0,
        lead_time_years: 15.0,
        technology_readiness: 4,
        summary: "Spacecraft hovers nearby and tugs the orbit through mutual gravity.",
    },
    PreventionMethod {
        method: "Ion Beam Shepherd",
        effectiveness_percent: 55.0,
        lead_time_years: 12.0,
        technology_readiness: 3,
        summary: "Continuous low thrust from an ion plume directed at the surface.",
    },
    PreventionMethod {
        method: "Nuclear Standoff",
        effectiveness_percent: 95.0,
        lead_time_years: 2.0,
        technology_readiness: 2,
        summary: "Standoff detonation ablates one face for a large impulsive push.",
    },
    PreventionMethod {
        method: "Laser Ablation",
        effectiveness_percent: 40.0,
        lead_time_years: 20.0,
        technology_readiness: 2,
        summary: "Sustained laser heating vaporizes surface material as propellant.",
    },
];

/// The deflection-strategy reference table.
pub fn prevention_methods() -> &'static [PreventionMethod] {
    PREVENTION_METHODS
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kilometer_body_is_extinction_class() {
        let result = compute_impact(1.0, 20.0);

        assert!(result.energy_mt > 1.0);
        // ~1.57e12 kg at 20 km/s is roughly 75,000 MT.
        assert!(result.energy_mt > 1000.0);
        assert_eq!(result.destruction_level, DestructionLevel::ExtinctionLevel);
        assert!(result.crater_diameter_km > 0.0);
        assert!(result.seismic_magnitude > 7.0);
    }

    #[test]
    fn mass_matches_uniform_sphere() {
        let result = compute_impact(1.0, 20.0);
        let expected = (4.0 / 3.0) * PI * 500.0f64.powi(3) * BODY_DENSITY;
        assert_relative_eq!(result.mass_kg, expected, max_relative = 1e-12);
    }

    #[test]
    fn zero_inputs_never_produce_nan() {
        for result in [compute_impact(0.0, 20.0), compute_impact(1.0, 0.0)] {
            assert_eq!(result.energy_mt, 0.0);
            assert_eq!(result.destruction_level, DestructionLevel::Local);
            assert_eq!(result.seismic_magnitude, 0.0);
            assert!(result.crater_diameter_km.is_finite());
            assert!(result.thermal_radius_km.is_finite());
            assert!(result.blast_radius_km.is_finite());
        }
    }

    #[test]
    fn destruction_thresholds_are_exclusive_lower_bounds() {
        assert_eq!(
            DestructionLevel::from_energy_mt(1.0),
            DestructionLevel::Local
        );
        assert_eq!(
            DestructionLevel::from_energy_mt(5.0),
            DestructionLevel::CityWide
        );
        assert_eq!(
            DestructionLevel::from_energy_mt(50.0),
            DestructionLevel::Regional
        );
        assert_eq!(
            DestructionLevel::from_energy_mt(500.0),
            DestructionLevel::Continental
        );
        assert_eq!(
            DestructionLevel::from_energy_mt(5000.0),
            DestructionLevel::ExtinctionLevel
        );
    }

    #[test]
    fn scaling_laws_use_documented_constants() {
        let result = compute_impact(0.1, 15.0);

        assert_relative_eq!(
            result.crater_diameter_km,
            0.9 * result.kinetic_energy_j.powf(0.29) * 0.001,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            result.thermal_radius_km,
            result.energy_mt.powf(0.41) * 3.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            result.blast_radius_km,
            result.energy_mt.cbrt() * 5.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn prevention_table_is_well_formed() {
        let methods = prevention_methods();
        assert_eq!(methods.len(), 5);
        for m in methods {
            assert!(m.effectiveness_percent > 0.0 && m.effectiveness_percent <= 100.0);
            assert!(m.lead_time_years > 0.0);
            assert!((1..=9).contains(&m.technology_readiness));
        }
    }
}
