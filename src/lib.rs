// neowatch - NEO visualization physics engine
// Pure computation core for an external charting frontend: orbit geometry,
// atmospheric entry, fragmentation, impact energetics, and hazard scoring

pub mod entry_sim;
pub mod fragmentation;
pub mod hazard;
pub mod impact_model;
pub mod neo_catalog;
pub mod orbit_engine;
pub mod session;

pub use entry_sim::{simulate_entry, EntryProfile};
pub use fragmentation::{fragment_body, Fragment, FRAGMENTATION_STRENGTH_PA};
pub use hazard::{assess_hazard, DeflectionMission, HazardScore, MissionPhase, ThreatStatus};
pub use impact_model::{compute_impact, prevention_methods, DestructionLevel, ImpactResult};
pub use neo_catalog::{CatalogError, CatalogStats, NeoCatalog, NeoFilter, NeoParameters, NeoSort};
pub use orbit_engine::{
    compute_orbit_path, compute_position, earth_orbit, earth_position, mars_orbit, OrbitPath, Vec3,
};
pub use session::{SessionHandle, SessionSnapshot};
