// Entry Simulator - atmospheric descent of a point-mass body
// Time-steps drag, heating, and ablation through an exponential atmosphere

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

// =============================================================================
// PHYSICAL CONSTANTS
// =============================================================================

/// Sea-level atmospheric density (kg/m³).
pub const SEA_LEVEL_DENSITY: f64 = 1.225;

/// Atmospheric scale height (km).
pub const SCALE_HEIGHT_KM: f64 = 8.5;

/// Drag coefficient for a sphere.
pub const DRAG_COEFFICIENT: f64 = 0.47;

/// Assumed uniform body density (kg/m³).
pub const BODY_DENSITY: f64 = 3000.0;

/// Effective heat of ablation (J/kg).
pub const HEAT_OF_ABLATION: f64 = 6.0e6;

/// Stagnation temperature ceiling (K), load-bearing for chart stability.
pub const MAX_STAGNATION_TEMP_K: f64 = 20_000.0;

/// Entry interface altitude (km). Every run restarts here.
pub const ENTRY_ALTITUDE_KM: f64 = 100.0;

/// Integration step (s).
pub const TIME_STEP_S: f64 = 0.1;

/// Simulation cap (s).
pub const MAX_SIMULATION_TIME_S: f64 = 300.0;

/// Surviving mass never drops below this fraction of the initial mass.
const MIN_MASS_FRACTION: f64 = 0.01;

// =============================================================================
// ENTRY PROFILE
// =============================================================================

/// Full descent time series plus scalar summary. All series share the time
/// axis and are always equal length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryProfile {
    pub time_s: Vec<f64>,
    pub altitude_km: Vec<f64>,
    pub velocity_km_s: Vec<f64>,
    pub dynamic_pressure_mpa: Vec<f64>,
    pub drag_force_gn: Vec<f64>,
    pub stagnation_temp_k: Vec<f64>,
    pub mach: Vec<f64>,

    pub final_altitude_km: f64,
    pub final_velocity_km_s: f64,
    pub mass_survival_percent: f64,
    /// Peak dynamic pressure in Pa; the fragmentation model consumes this.
    pub peak_dynamic_pressure_pa: f64,
    pub peak_dynamic_pressure_mpa: f64,
    pub peak_drag_force_gn: f64,
    pub peak_stagnation_temp_k: f64,
}

impl EntryProfile {
    pub fn samples(&self) -> usize {
        self.time_s.len()
    }
}

/// Speed of sound approximation by altitude (m/s), floored in the upper
/// atmosphere.
fn speed_of_sound(altitude_km: f64) -> f64 {
    (340.0 - 0.5 * altitude_km).max(280.0)
}

/// Simulate a single linear descent from the entry interface.
///
/// Inputs: body diameter (km), entry velocity (km/s), entry angle (degrees
/// from horizontal). The run terminates on ground contact, full stop, or the
/// 300 s cap. Implausible inputs degrade gracefully through the mass floor;
/// no error paths exist.
pub fn simulate_entry(
    diameter_km: f64,
    entry_velocity_km_s: f64,
    entry_angle_deg: f64,
) -> EntryProfile {
    let radius_m = diameter_km * 1000.0 / 2.0;
    let area = PI * radius_m * radius_m;
    let initial_mass = (4.0 / 3.0) * PI * radius_m.powi(3) * BODY_DENSITY;
    // Same guard the n-body SRP path uses: never divide by a vanishing mass.
    let mass_floor = (initial_mass * MIN_MASS_FRACTION).max(1.0);

    let sin_angle = entry_angle_deg.to_radians().sin();

    let mut altitude = ENTRY_ALTITUDE_KM;
    let mut velocity = entry_velocity_km_s * 1000.0; // m/s
    let mut mass = initial_mass.max(1.0);
    let mut t = 0.0;

    let mut profile = EntryProfile {
        time_s: Vec::new(),
        altitude_km: Vec::new(),
        velocity_km_s: Vec::new(),
        dynamic_pressure_mpa: Vec::new(),
        drag_force_gn: Vec::new(),
        stagnation_temp_k: Vec::new(),
        mach: Vec::new(),
        final_altitude_km: 0.0,
        final_velocity_km_s: 0.0,
        mass_survival_percent: 100.0,
        peak_dynamic_pressure_pa: 0.0,
        peak_dynamic_pressure_mpa: 0.0,
        peak_drag_force_gn: 0.0,
        peak_stagnation_temp_k: 0.0,
    };

    while altitude > 0.0 && velocity > 0.0 && t < MAX_SIMULATION_TIME_S {
        let density = SEA_LEVEL_DENSITY * (-altitude / SCALE_HEIGHT_KM).exp();
        let dynamic_pressure = 0.5 * density * velocity * velocity;
        let drag_force = dynamic_pressure * DRAG_COEFFICIENT * area;
        let mach = velocity / speed_of_sound(altitude);
        let stagnation_temp = (288.0 * (1.0 + 0.2 * mach * mach)).min(MAX_STAGNATION_TEMP_K);

        profile.time_s.push(t);
        profile.altitude_km.push(altitude);
        profile.velocity_km_s.push(velocity / 1000.0);
        profile.dynamic_pressure_mpa.push(dynamic_pressure / 1.0e6);
        profile.drag_force_gn.push(drag_force / 1.0e9);
        profile.stagnation_temp_k.push(stagnation_temp);
        profile.mach.push(mach);

        if dynamic_pressure > profile.peak_dynamic_pressure_pa {
            profile.peak_dynamic_pressure_pa = dynamic_pressure;
        }
        if drag_force / 1.0e9 > profile.peak_drag_force_gn {
            profile.peak_drag_force_gn = drag_force / 1.0e9;
        }
        if stagnation_temp > profile.peak_stagnation_temp_k {
            profile.peak_stagnation_temp_k = stagnation_temp;
        }

        // Decelerate, descend, ablate.
        let deceleration = drag_force / mass;
        velocity -= deceleration * TIME_STEP_S;
        altitude -= velocity * sin_angle * TIME_STEP_S / 1000.0;

        let heat_flux = 0.5 * density * velocity.powi(3);
        let mass_loss = heat_flux * area * TIME_STEP_S / HEAT_OF_ABLATION;
        mass = (mass - mass_loss).max(mass_floor);

        t += TIME_STEP_S;
    }

    profile.peak_dynamic_pressure_mpa = profile.peak_dynamic_pressure_pa / 1.0e6;
    profile.final_altitude_km = altitude.max(0.0);
    profile.final_velocity_km_s = velocity.max(0.0) / 1000.0;
    profile.mass_survival_percent = if initial_mass > 0.0 {
        (mass / initial_mass * 100.0).min(100.0)
    } else {
        100.0
    };

    profile
}

// =============================================================================
// TESTS
// =============================================================================
