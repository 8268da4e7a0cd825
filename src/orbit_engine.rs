// Orbit Engine - Keplerian orbit geometry
// Converts orbital elements into 3D heliocentric paths and instantaneous positions

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::neo_catalog::NeoParameters;

/// Samples per full revolution unless the caller asks otherwise.
pub const DEFAULT_ORBIT_POINTS: usize = 360;

/// Fixed-point iteration count for Kepler's equation. A design constant, not
/// adaptive: for e close to 1 the iteration may not fully converge, and the
/// result is treated as an accepted approximation.
pub const KEPLER_ITERATIONS: usize = 10;

// =============================================================================
// 3D VECTOR
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// =============================================================================
// ORBIT PATH
// =============================================================================

/// A sampled closed orbit curve in AU, stored as parallel coordinate vectors
/// ready for a 3D line trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitPath {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl OrbitPath {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, index: usize) -> Vec3 {
        Vec3::new(self.x[index], self.y[index], self.z[index])
    }
}

/// Rotate a point in the orbital plane into the inertial frame via the
/// standard three-angle (Ω, i, ω) rotation matrix. Angles in radians.
fn rotate_to_inertial(x_orb: f64, y_orb: f64, i: f64, omega: f64, omega_big: f64) -> Vec3 {
    let cos_omega = omega_big.cos();
    let sin_omega = omega_big.sin();
    let cos_w = omega.cos();
    let sin_w = omega.sin();
    let cos_i = i.cos();
    let sin_i = i.sin();

    let r11 = cos_omega * cos_w - sin_omega * sin_w * cos_i;
    let r12 = -cos_omega * sin_w - sin_omega * cos_w * cos_i;
    let r21 = sin_omega * cos_w + cos_omega * sin_w * cos_i;
    let r22 = -sin_omega * sin_w + cos_omega * cos_w * cos_i;
    let r31 = sin_w * sin_i;
    let r32 = cos_w * sin_i;

    Vec3::new(
        r11 * x_orb + r12 * y_orb,
        r21 * x_orb + r22 * y_orb,
        r31 * x_orb + r32 * y_orb,
    )
}

/// One sample of the conic section at true-anomaly-like angle theta (radians).
fn conic_point(a: f64, e: f64, i: f64, omega: f64, omega_big: f64, theta: f64) -> Vec3 {
    // Polar conic equation. e >= 1 is deliberately unguarded: the caller
    // either pre-validates or accepts degenerate geometry.
    let r = (a * (1.0 - e * e)) / (1.0 + e * theta.cos());
    let x_orb = r * theta.cos();
    let y_orb = r * theta.sin();
    rotate_to_inertial(x_orb, y_orb, i, omega, omega_big)
}

/// Sample a full orbit from Keplerian elements. Angles in degrees, semi-major
/// axis in AU. Returns exactly `num_points` samples forming a closed loop.
pub fn compute_orbit_path(
    a: f64,
    e: f64,
    i_deg: f64,
    omega_deg: f64,
    omega_big_deg: f64,
    num_points: usize,
) -> OrbitPath {
    let i = i_deg.to_radians();
    let omega = omega_deg.to_radians();
    let omega_big = omega_big_deg.to_radians();

    let mut path = OrbitPath {
        x: Vec::with_capacity(num_points),
        y: Vec::with_capacity(num_points),
        z: Vec::with_capacity(num_points),
    };

    let step = 360.0 / num_points as f64;
    for n in 0..num_points {
        let theta = (n as f64 * step).to_radians();
        let p = conic_point(a, e, i, omega, omega_big, theta);
        path.x.push(p.x);
        path.y.push(p.y);
        path.z.push(p.z);
    }

    path
}

/// Solve Kepler's equation M = E - e*sin(E) by functional iteration
/// E <- M + e*sin(E), running exactly `KEPLER_ITERATIONS` passes.
fn solve_kepler_fixed_point(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut e_anom = mean_anomaly;
    for _ in 0..KEPLER_ITERATIONS {
        e_anom = mean_anomaly + eccentricity * e_anom.sin();
    }
    e_anom
}

/// Instantaneous heliocentric position (AU) of a NEO, with the animation
/// frame added to the base mean anomaly in degrees.
///
/// A missing or zero semi-major axis yields the origin: "no orbit data" by
/// convention, not an error.
pub fn compute_position(neo: &NeoParameters, mean_anomaly_offset_deg: f64) -> Vec3 {
    let a = match neo.semi_major_axis {
        Some(a) if a != 0.0 => a,
        _ => return Vec3::zero(),
    };

    let e = neo.eccentricity_or_default();
    let i = neo.inclination_or_default().to_radians();
    let omega = neo.argument_of_perihelion_or_default().to_radians();
    let omega_big = neo.longitude_ascending_node_or_default().to_radians();
    let m = (neo.mean_anomaly_or_default() + mean_anomaly_offset_deg).to_radians();

    let e_anom = solve_kepler_fixed_point(m, e);

    // True anomaly via the half-angle tangent formula.
    let true_anomaly = 2.0 * (((1.0 + e) / (1.0 - e)).sqrt() * (e_anom / 2.0).tan()).atan();
    let r = a * (1.0 - e * e_anom.cos());

    let x_orb = r * true_anomaly.cos();
    let y_orb = r * true_anomaly.sin();
    rotate_to_inertial(x_orb, y_orb, i, omega, omega_big)
}

// =============================================================================
// REFERENCE ORBITS
// =============================================================================

/// Earth's orbit, approximately circular at 1 AU.
pub fn earth_orbit() -> OrbitPath {
    compute_orbit_path(1.0, 0.017, 0.0, 0.0, 0.0, DEFAULT_ORBIT_POINTS)
}

/// Mars' orbit, drawn for scale reference.
pub fn mars_orbit() -> OrbitPath {
    compute_orbit_path(1.524, 0.093, 1.85, 286.5, 49.6, DEFAULT_ORBIT_POINTS)
}

/// Earth marker position for a given animation frame (degrees), on the
/// idealized unit circle the dashboard animates against.
pub fn earth_position(frame_deg: f64) -> Vec3 {
    let angle = frame_deg * PI / 180.0;
    Vec3::new(angle.cos(), angle.sin(), 0.0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn neo_with_elements(a: Option<f64>, e: Option<f64>) -> NeoParameters {
        NeoParameters {
            name: "test".to_string(),
            diameter: 0.5,
            distance: 5_000_000.0,
            relative_velocity: None,
            semi_major_axis: a,
            eccentricity: e,
            inclination: Some(0.0),
            argument_of_perihelion: Some(0.0),
            longitude_ascending_node: Some(0.0),
            mean_anomaly: Some(0.0),
            orbital_period: None,
            close_approach_date: None,
            is_potentially_hazardous: false,
        }
    }

    #[test]
    fn path_has_exactly_num_points() {
        let path = compute_orbit_path(1.2, 0.3, 10.0, 45.0, 80.0, 360);
        assert_eq!(path.len(), 360);

        let coarse = compute_orbit_path(1.2, 0.3, 10.0, 45.0, 80.0, 72);
        assert_eq!(coarse.len(), 72);
    }

    #[test]
    fn path_is_closed_over_a_full_revolution() {
        let (a, e) = (1.5, 0.4);
        let (i, w, om) = (12.0_f64.to_radians(), 30.0_f64.to_radians(), 60.0_f64.to_radians());

        let start = conic_point(a, e, i, w, om, 0.0);
        let end = conic_point(a, e, i, w, om, 2.0 * PI);

        assert_relative_eq!(start.x, end.x, epsilon = 1e-9);
        assert_relative_eq!(start.y, end.y, epsilon = 1e-9);
        assert_relative_eq!(start.z, end.z, epsilon = 1e-9);
    }

    #[test]
    fn circular_orbit_position_on_x_axis() {
        // e=0, a=1, all angles zero, no offset -> (1, 0, 0).
        let neo = neo_with_elements(Some(1.0), Some(0.0));
        let pos = compute_position(&neo, 0.0);

        assert_relative_eq!(pos.x, 1.0, epsilon = 1e-9);
        assert_relative_eq!(pos.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pos.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn missing_semi_major_axis_yields_origin() {
        let none = neo_with_elements(None, Some(0.2));
        assert_eq!(compute_position(&none, 45.0), Vec3::zero());

        let zero = neo_with_elements(Some(0.0), Some(0.2));
        assert_eq!(compute_position(&zero, 45.0), Vec3::zero());
    }

    #[test]
    fn kepler_solver_matches_equation_at_moderate_eccentricity() {
        let (m, e) = (0.8, 0.3);
        let e_anom = solve_kepler_fixed_point(m, e);
        // Residual of M = E - e*sin(E) after the fixed iteration count.
        let residual = (e_anom - e * e_anom.sin() - m).abs();
        assert!(residual < 1e-9, "residual too high: {residual}");
    }

    #[test]
    fn high_eccentricity_position_stays_finite() {
        // Near-parabolic input: the fixed-point solver is not guaranteed to
        // converge here, but the output must stay numerically usable.
        let neo = neo_with_elements(Some(2.5), Some(0.97));
        for offset in [0.0, 90.0, 180.0, 270.0] {
            let pos = compute_position(&neo, offset);
            assert!(pos.is_finite(), "non-finite position at offset {offset}");
        }
    }

    #[test]
    fn earth_marker_follows_unit_circle() {
        let at_90 = earth_position(90.0);
        assert_relative_eq!(at_90.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(at_90.y, 1.0, epsilon = 1e-12);

        assert_relative_eq!(earth_position(0.0).x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn reference_orbits_are_full_resolution() {
        assert_eq!(earth_orbit().len(), DEFAULT_ORBIT_POINTS);
        assert_eq!(mars_orbit().len(), DEFAULT_ORBIT_POINTS);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every elliptical element set yields the requested sample count
        /// with finite coordinates.
        #[test]
        fn path_well_formed_for_elliptical_elements(
            a in 0.1f64..5.0,
            e in 0.0f64..0.95,
            i in 0.0f64..180.0,
            w in 0.0f64..360.0,
            om in 0.0f64..360.0,
            n in 4usize..720,
        ) {
            let path = compute_orbit_path(a, e, i, w, om, n);
            prop_assert_eq!(path.len(), n);
            for idx in 0..path.len() {
                prop_assert!(path.point(idx).is_finite());
            }
        }

        /// Position computation is deterministic: identical inputs give
        /// bit-identical output.
        #[test]
        fn position_is_referentially_transparent(
            a in 0.5f64..3.0,
            e in 0.0f64..0.9,
            offset in 0.0f64..360.0,
        ) {
            let neo = neo_with_elements(Some(a), Some(e));
            let first = compute_position(&neo, offset);
            let second = compute_position(&neo, offset);
            prop_assert_eq!(first, second);
        }
    }
}
