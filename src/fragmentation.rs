// Fragmentation Model - breakup of a body under peak entry pressure
// Deterministic fragment population; a labeled approximation, not DEM contact mechanics

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::f64::consts::PI;
use std::hash::{Hash, Hasher};

use crate::orbit_engine::Vec3;

/// Aerodynamic strength threshold (Pa). Below this the body stays whole.
pub const FRAGMENTATION_STRENGTH_PA: f64 = 1.0e6;

/// Hard cap on the fragment count.
pub const MAX_FRAGMENTS: usize = 50;

/// Depletion loop exits once the unclaimed pool drops below this (percent).
const MIN_REMAINING_PERCENT: f64 = 1.0;

/// Golden-angle spread (degrees) between successive fragment directions.
const DISPERSAL_ANGLE_DEG: f64 = 137.5;

// =============================================================================
// FRAGMENT
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// Sequence index within one fragmentation event.
    pub id: usize,
    /// Relative position in arbitrary visualization units.
    pub position: Vec3,
    pub size_km: f64,
    /// Percent of the original body mass. Sums to 100 across one event.
    pub mass_percent: f64,
    /// Dispersal velocity (m/s).
    pub velocity: Vec3,
    /// Marks the single residual-mass catch-all entry.
    pub is_dust: bool,
}

// =============================================================================
// DETERMINISTIC PRNG
// =============================================================================

/// Seed derived purely from the event inputs, so identical inputs reproduce
/// the identical fragment population.
fn seed_from_inputs(diameter_km: f64, pressure_ratio: f64) -> u64 {
    let mut hasher = DefaultHasher::new();
    diameter_km.to_bits().hash(&mut hasher);
    pressure_ratio.to_bits().hash(&mut hasher);
    hasher.finish()
}

/// LCG step mapped to [0, 1) (Numerical Recipes parameters).
fn next_unit(seed: &mut u64) -> f64 {
    *seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
    ((*seed >> 16) & 0x7FFF) as f64 / 32768.0
}

// =============================================================================
// FRAGMENTATION
// =============================================================================

/// Derive the fragment population for a body of `diameter_km` that saw
/// `peak_pressure_pa` during entry.
///
/// If the peak pressure never exceeded the strength threshold, the result is
/// one whole-body fragment at rest. Otherwise the original mass pool is
/// depleted fragment by fragment, each claiming 30-50% of what remains, and
/// the unclaimed residue is appended as a dust entry so the masses always
/// account for the full body.
pub fn fragment_body(diameter_km: f64, peak_pressure_pa: f64) -> Vec<Fragment> {
    if peak_pressure_pa <= FRAGMENTATION_STRENGTH_PA {
        return vec![Fragment {
            id: 0,
            position: Vec3::zero(),
            size_km: diameter_km,
            mass_percent: 100.0,
            velocity: Vec3::zero(),
            is_dust: false,
        }];
    }

    let pressure_ratio = peak_pressure_pa / FRAGMENTATION_STRENGTH_PA;
    let count = ((pressure_ratio * 5.0).floor() as usize).min(MAX_FRAGMENTS);
    let mut seed = seed_from_inputs(diameter_km, pressure_ratio);

    let mut fragments = Vec::with_capacity(count + 1);
    let mut remaining = 100.0;

    for index in 0..count {
        if remaining < MIN_REMAINING_PERCENT {
            break;
        }

        // Each fragment claims 0.3-0.5 of the unclaimed pool.
        let fraction = 0.3 + 0.2 * next_unit(&mut seed);
        let mass_percent = remaining * fraction;
        remaining -= mass_percent;

        // Volume-mass scaling: size goes with the cube root of the share.
        let size_km = diameter_km * (mass_percent / 100.0).cbrt();

        // Trigonometric spread indexed by fragment number; the speed draw is
        // the only per-fragment randomness.
        let azimuth = (index as f64 * DISPERSAL_ANGLE_DEG).to_radians();
        let elevation = (index as f64 * 0.5).sin() * (PI / 6.0);
        let speed = 100.0 + 150.0 * next_unit(&mut seed);

        let radial = 0.15 * (index + 1) as f64;
        let position = Vec3::new(
            radial * azimuth.cos() * elevation.cos(),
            radial * azimuth.sin() * elevation.cos(),
            radial * elevation.sin(),
        );
        let velocity = Vec3::new(
            speed * azimuth.cos() * elevation.cos(),
            speed * azimuth.sin() * elevation.cos(),
            speed * elevation.sin(),
        );

        fragments.push(Fragment {
            id: index,
            position,
            size_km,
            mass_percent,
            velocity,
            is_dust: false,
        });
    }

    // Whatever the loop left unclaimed travels on as dust.
    fragments.push(Fragment {
        id: fragments.len(),
        position: Vec3::zero(),
        size_km: diameter_km * 1.0e-3,
        mass_percent: remaining,
        velocity: Vec3::zero(),
        is_dust: true,
    });

    fragments
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn total_mass(fragments: &[Fragment]) -> f64 {
        fragments.iter().map(|f| f.mass_percent).sum()
    }

    #[test]
    fn below_threshold_stays_whole() {
        let fragments = fragment_body(0.5, 0.8e6);

        assert_eq!(fragments.len(), 1);
        assert!(!fragments[0].is_dust);
        assert!((fragments[0].mass_percent - 100.0).abs() < 1e-12);
        assert!((fragments[0].size_km - 0.5).abs() < 1e-12);
        assert_eq!(fragments[0].velocity, Vec3::zero());
    }

    #[test]
    fn masses_sum_to_one_hundred() {
        let fragments = fragment_body(0.5, 4.2e6);
        assert!(fragments.len() > 1);
        assert!((total_mass(&fragments) - 100.0).abs() < 0.5);
    }

    #[test]
    fn fragment_count_is_capped() {
        // Ratio 1000 would ask for 5000 fragments; the cap holds it to 50
        // plus the dust entry.
        let fragments = fragment_body(1.0, 1.0e9);
        assert!(fragments.len() <= MAX_FRAGMENTS + 1);
    }

    #[test]
    fn exactly_one_dust_entry_and_it_is_last() {
        let fragments = fragment_body(0.3, 6.0e6);

        let dust_count = fragments.iter().filter(|f| f.is_dust).count();
        assert_eq!(dust_count, 1);
        assert!(fragments.last().unwrap().is_dust);
        assert!(fragments.last().unwrap().size_km < 0.3 * 1e-2);
    }

    #[test]
    fn fragments_never_exceed_parent_size() {
        let diameter = 0.8;
        for fragment in fragment_body(diameter, 3.0e6) {
            assert!(fragment.size_km <= diameter);
        }
    }

    #[test]
    fn identical_inputs_reproduce_identical_populations() {
        let a = fragment_body(0.42, 5.5e6);
        let b = fragment_body(0.42, 5.5e6);

        assert_eq!(a.len(), b.len());
        for (fa, fb) in a.iter().zip(&b) {
            assert_eq!(fa.mass_percent, fb.mass_percent);
            assert_eq!(fa.velocity, fb.velocity);
            assert_eq!(fa.position, fb.position);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Mass accounting closes for any triggering pressure.
        #[test]
        fn mass_accounting_closes(
            diameter in 0.01f64..5.0,
            pressure in 1.1e6f64..1.0e9,
        ) {
            let fragments = fragment_body(diameter, pressure);
            prop_assert!((total_mass(&fragments) - 100.0).abs() < 0.5);
            prop_assert!(fragments.len() <= MAX_FRAGMENTS + 1);
            for f in &fragments {
                prop_assert!(f.mass_percent >= 0.0);
                prop_assert!(f.size_km.is_finite());
            }
        }
    }
}
