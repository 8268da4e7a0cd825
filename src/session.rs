// Session - caller-owned simulation session state
// Thread-safe handle over selection, animation frame, mission, and playback;
// the engine functions themselves stay pure and hold no global state

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entry_sim::EntryProfile;
use crate::hazard::{assess_hazard, DeflectionMission, HazardScore, MissionPhase};
use crate::neo_catalog::NeoParameters;
use crate::orbit_engine::{compute_position, Vec3};

/// Mean-anomaly degrees added per animation tick.
pub const DEFAULT_FRAME_STEP_DEG: f64 = 2.0;

const FULL_CIRCLE_DEG: f64 = 360.0;

// =============================================================================
// SESSION STATE
// =============================================================================

/// Playback cursor over an already-computed entry profile. Stepping only
/// moves an index; nothing is recomputed.
#[derive(Debug, Clone)]
pub struct EntryPlayback {
    pub profile: EntryProfile,
    pub cursor: usize,
}

/// One sample surfaced during playback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSample {
    pub index: usize,
    pub time_s: f64,
    pub altitude_km: f64,
    pub velocity_km_s: f64,
    pub dynamic_pressure_mpa: f64,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub selected: Option<NeoParameters>,
    /// Mean-anomaly offset in degrees, wrapped at 360.
    pub animation_frame: f64,
    pub frame_step: f64,
    pub is_animating: bool,
    pub mission: DeflectionMission,
    pub playback: Option<EntryPlayback>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            selected: None,
            animation_frame: 0.0,
            frame_step: DEFAULT_FRAME_STEP_DEG,
            is_animating: false,
            mission: DeflectionMission::new(),
            playback: None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZABLE SNAPSHOT
// =============================================================================

/// Flattened view of the session for a rendering frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub selected_name: Option<String>,
    pub animation_frame: f64,
    pub is_animating: bool,
    pub position: Vec3,
    pub mission_phase: MissionPhase,
    pub mission_progress: f64,
    pub playback_index: Option<usize>,
}

// =============================================================================
// SESSION HANDLE
// =============================================================================

/// Shared, thread-safe session handle. Ticks come from a caller-owned timer;
/// each tick is a discrete, non-overlapping update.
#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<RwLock<SessionState>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::new())),
        }
    }

    /// Select the active NEO. Switching objects resets the animation frame,
    /// the deflection mission, and any playback.
    pub fn select(&self, neo: NeoParameters) {
        let mut state = self.state.write();
        state.selected = Some(neo);
        state.animation_frame = 0.0;
        state.mission.reset();
        state.playback = None;
    }

    pub fn selected(&self) -> Option<NeoParameters> {
        self.state.read().selected.clone()
    }

    pub fn play(&self) {
        self.state.write().is_animating = true;
    }

    pub fn pause(&self) {
        self.state.write().is_animating = false;
    }

    pub fn reset_frame(&self) {
        self.state.write().animation_frame = 0.0;
    }

    pub fn set_frame_step(&self, step_deg: f64) {
        self.state.write().frame_step = step_deg;
    }

    /// Advance one tick: the animation frame moves by the configured step
    /// (when playing) and the deflection mission progresses. Returns the
    /// frame after the update.
    pub fn tick(&self) -> f64 {
        let mut state = self.state.write();
        if state.is_animating {
            state.animation_frame = (state.animation_frame + state.frame_step) % FULL_CIRCLE_DEG;
        }
        state.mission.tick();
        state.animation_frame
    }

    /// Heliocentric position of the selection at the current frame offset.
    /// Origin when nothing is selected or the record has no orbit data.
    pub fn current_position(&self) -> Vec3 {
        let state = self.state.read();
        match &state.selected {
            Some(neo) => compute_position(neo, state.animation_frame),
            None => Vec3::zero(),
        }
    }

    /// Hazard score of the current selection.
    pub fn assess_selected(&self) -> Option<HazardScore> {
        self.state.read().selected.as_ref().map(assess_hazard)
    }

    pub fn deploy_deflection(&self) {
        self.state.write().mission.deploy();
    }

    pub fn mission(&self) -> DeflectionMission {
        self.state.read().mission.clone()
    }

    /// Install a computed entry profile for playback, cursor at the start.
    pub fn load_entry_profile(&self, profile: EntryProfile) {
        self.state.write().playback = Some(EntryPlayback { profile, cursor: 0 });
    }

    /// Step the playback cursor and return the sample it lands on. Returns
    /// `None` once the series is exhausted (or when no profile is loaded).
    pub fn step_playback(&self) -> Option<PlaybackSample> {
        let mut state = self.state.write();
        let playback = state.playback.as_mut()?;

        if playback.cursor >= playback.profile.samples() {
            return None;
        }

        let index = playback.cursor;
        playback.cursor += 1;

        Some(PlaybackSample {
            index,
            time_s: playback.profile.time_s[index],
            altitude_km: playback.profile.altitude_km[index],
            velocity_km_s: playback.profile.velocity_km_s[index],
            dynamic_pressure_mpa: playback.profile.dynamic_pressure_mpa[index],
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read();
        let position = match &state.selected {
            Some(neo) => compute_position(neo, state.animation_frame),
            None => Vec3::zero(),
        };

        SessionSnapshot {
            selected_name: state.selected.as_ref().map(|n| n.name.clone()),
            animation_frame: state.animation_frame,
            is_animating: state.is_animating,
            position,
            mission_phase: state.mission.phase,
            mission_progress: state.mission.progress,
            playback_index: state.playback.as_ref().map(|p| p.cursor),
        }
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
