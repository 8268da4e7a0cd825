// Hazard Assessment - threat scoring and deflection mission tracking
// Weighted composite threat level plus an order-of-magnitude collision indicator

use serde::{Deserialize, Serialize};

use crate::neo_catalog::NeoParameters;

/// Threat level above which status becomes danger.
pub const DANGER_THRESHOLD: f64 = 70.0;

/// Threat level above which status becomes warning.
pub const WARNING_THRESHOLD: f64 = 40.0;

/// Collision probability cap for PHA-flagged objects.
pub const HAZARDOUS_PROBABILITY_CAP: f64 = 0.01;

/// Collision probability cap for unflagged objects.
pub const UNFLAGGED_PROBABILITY_CAP: f64 = 0.001;

/// Velocity assumed by hazard scoring when the record carries none (km/s).
pub const DEFAULT_ASSESSMENT_VELOCITY_KM_S: f64 = 20.0;

// =============================================================================
// HAZARD SCORE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatStatus {
    Safe,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardScore {
    /// Weighted composite in [0, 100].
    pub threat_level: f64,
    pub status: ThreatStatus,
    /// Heuristic order-of-magnitude indicator, not a rigorous probability.
    pub collision_probability: f64,
    pub time_to_impact_days: f64,
}

/// Score one NEO from its approach distance, size, and velocity.
///
/// The sub-scores are clamped before weighting, so the composite stays in
/// [0, 100] for any non-negative inputs. These caps are load-bearing for
/// chart stability.
pub fn assess_hazard(neo: &NeoParameters) -> HazardScore {
    let velocity = neo.relative_velocity_or(DEFAULT_ASSESSMENT_VELOCITY_KM_S);

    let distance_score = (100.0 - neo.distance / 1.0e6).max(0.0);
    let size_score = (neo.diameter * 50.0).min(100.0);
    let velocity_score = (velocity * 3.0).min(100.0);

    let threat_level = 0.4 * distance_score + 0.35 * size_score + 0.25 * velocity_score;

    let status = if threat_level > DANGER_THRESHOLD {
        ThreatStatus::Danger
    } else if threat_level > WARNING_THRESHOLD {
        ThreatStatus::Warning
    } else {
        ThreatStatus::Safe
    };

    let cap = if neo.is_potentially_hazardous {
        HAZARDOUS_PROBABILITY_CAP
    } else {
        UNFLAGGED_PROBABILITY_CAP
    };
    // Inverse-distance falloff, saturating at the cap for very close passes.
    let collision_probability = (cap / (1.0 + neo.distance / 1.0e6)).min(cap);

    // Straight-line closing time: km -> m over km/s -> m/s, expressed in days.
    let time_to_impact_days = if velocity > 0.0 {
        (neo.distance * 1000.0) / (velocity * 1000.0) / 86_400.0
    } else {
        0.0
    };

    HazardScore {
        threat_level,
        status,
        collision_probability,
        time_to_impact_days,
    }
}

// =============================================================================
// DEFLECTION MISSION STATE MACHINE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionPhase {
    Monitoring,
    Deflecting,
    Deflected,
}

/// Progress gained per tick while deflecting.
pub const MISSION_PROGRESS_PER_TICK: f64 = 2.0;

/// Deflection mission tracker. Advanced by a caller-owned timer; each tick is
/// a discrete, idempotent update with no self-driving behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeflectionMission {
    pub phase: MissionPhase,
    /// 0-100 while deflecting; pinned at 100 once deflected.
    pub progress: f64,
}

impl DeflectionMission {
    pub fn new() -> Self {
        Self {
            phase: MissionPhase::Monitoring,
            progress: 0.0,
        }
    }

    /// `monitoring -> deflecting`. A no-op from any other phase.
    pub fn deploy(&mut self) {
        if self.phase == MissionPhase::Monitoring {
            self.phase = MissionPhase::Deflecting;
            self.progress = 0.0;
        }
    }

    /// Advance one tick. Only the deflecting phase moves; `deflected` is
    /// terminal until reset.
    pub fn tick(&mut self) {
        if self.phase == MissionPhase::Deflecting {
            self.progress += MISSION_PROGRESS_PER_TICK;
            if self.progress >= 100.0 {
                self.progress = 100.0;
                self.phase = MissionPhase::Deflected;
            }
        }
    }

    /// Back to monitoring from any state.
    pub fn reset(&mut self) {
        self.phase = MissionPhase::Monitoring;
        self.progress = 0.0;
    }
}

impl Default for DeflectionMission {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
