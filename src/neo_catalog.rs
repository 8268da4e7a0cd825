// NEO Catalog - parameter records and in-memory dataset handling
// Parses NEO datasets and provides filtering, sorting, and headline statistics

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Close-approach distance below which an object counts as a close approach
/// (0.05 AU, the PHA distance criterion).
pub const PHA_DISTANCE_THRESHOLD_KM: f64 = 7_500_000.0;

/// Eccentricity assumed when a record omits it.
pub const DEFAULT_ECCENTRICITY: f64 = 0.1;

// =============================================================================
// NEO PARAMETER RECORD
// =============================================================================

/// One Near-Earth Object as supplied by the dataset. Optional orbital elements
/// stay `None` here; the documented defaults are applied by the accessors
/// below, never silently at parse time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoParameters {
    pub name: String,
    /// Mean diameter (km).
    pub diameter: f64,
    /// Current approach distance from Earth (km).
    pub distance: f64,
    /// Relative velocity (km/s). Call sites pick their own default.
    #[serde(default)]
    pub relative_velocity: Option<f64>,
    /// Semi-major axis (AU). Absent means "no orbit data".
    #[serde(default)]
    pub semi_major_axis: Option<f64>,
    /// Eccentricity in [0, 1). Hyperbolic elements are not handled.
    #[serde(default)]
    pub eccentricity: Option<f64>,
    /// Inclination (degrees).
    #[serde(default)]
    pub inclination: Option<f64>,
    /// Argument of perihelion ω (degrees).
    #[serde(default)]
    pub argument_of_perihelion: Option<f64>,
    /// Longitude of the ascending node Ω (degrees).
    #[serde(default)]
    pub longitude_ascending_node: Option<f64>,
    /// Mean anomaly at epoch (degrees).
    #[serde(default)]
    pub mean_anomaly: Option<f64>,
    /// Orbital period (days).
    #[serde(default)]
    pub orbital_period: Option<f64>,
    /// Close approach date as "YYYY-MM-DD", when the dataset carries one.
    #[serde(default)]
    pub close_approach_date: Option<String>,
    /// Externally supplied PHA flag; consumed, never derived here.
    #[serde(default)]
    pub is_potentially_hazardous: bool,
}

impl NeoParameters {
    pub fn eccentricity_or_default(&self) -> f64 {
        self.eccentricity.unwrap_or(DEFAULT_ECCENTRICITY)
    }

    pub fn inclination_or_default(&self) -> f64 {
        self.inclination.unwrap_or(0.0)
    }

    pub fn argument_of_perihelion_or_default(&self) -> f64 {
        self.argument_of_perihelion.unwrap_or(0.0)
    }

    pub fn longitude_ascending_node_or_default(&self) -> f64 {
        self.longitude_ascending_node.unwrap_or(0.0)
    }

    pub fn mean_anomaly_or_default(&self) -> f64 {
        self.mean_anomaly.unwrap_or(0.0)
    }

    /// Relative velocity with a caller-chosen fallback (km/s). Hazard scoring
    /// uses 20, entry simulation defaults use 15.
    pub fn relative_velocity_or(&self, default_km_s: f64) -> f64 {
        self.relative_velocity.unwrap_or(default_km_s)
    }

    /// Parsed close-approach date; malformed or absent dates sort last rather
    /// than failing.
    pub fn approach_date(&self) -> Option<NaiveDate> {
        self.close_approach_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse NEO dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("dataset contains no objects")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeoFilter {
    All,
    HazardousOnly,
    /// Distance below 10 million km.
    CloseApproach,
    /// Diameter above 0.5 km.
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeoSort {
    Distance,
    Size,
    Velocity,
    ApproachDate,
}

/// Headline numbers for the dashboard metric cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total: usize,
    pub hazardous: usize,
    pub close_approaches: usize,
    pub avg_velocity_km_s: f64,
    pub max_diameter_km: f64,
    pub min_distance_km: f64,
}

/// An in-memory, read-only NEO dataset. Loading is the caller's concern; this
/// type only ingests already-fetched JSON.
#[derive(Debug, Clone)]
pub struct NeoCatalog {
    objects: Vec<NeoParameters>,
    loaded_at: DateTime<Utc>,
}

impl NeoCatalog {
    pub fn new(objects: Vec<NeoParameters>) -> Result<Self, CatalogError> {
        if objects.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self {
            objects,
            loaded_at: Utc::now(),
        })
    }

    /// Parse a dataset from a JSON array of NEO records.
    pub fn from_json_str(payload: &str) -> Result<Self, CatalogError> {
        let objects: Vec<NeoParameters> = serde_json::from_str(payload)?;
        Self::new(objects)
    }

    pub fn objects(&self) -> &[NeoParameters] {
        &self.objects
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn get(&self, name: &str) -> Option<&NeoParameters> {
        self.objects.iter().find(|n| n.name == name)
    }

    /// Filtered and sorted view of the dataset.
    pub fn select(&self, filter: NeoFilter, sort: NeoSort) -> Vec<&NeoParameters> {
        let mut result: Vec<&NeoParameters> = self
            .objects
            .iter()
            .filter(|n| match filter {
                NeoFilter::All => true,
                NeoFilter::HazardousOnly => n.is_potentially_hazardous,
                NeoFilter::CloseApproach => n.distance < 10_000_000.0,
                NeoFilter::Large => n.diameter > 0.5,
            })
            .collect();

        match sort {
            NeoSort::Distance => {
                result.sort_by(|a, b| a.distance.total_cmp(&b.distance));
            }
            NeoSort::Size => {
                result.sort_by(|a, b| b.diameter.total_cmp(&a.diameter));
            }
            NeoSort::Velocity => {
                result.sort_by(|a, b| {
                    b.relative_velocity_or(0.0)
                        .total_cmp(&a.relative_velocity_or(0.0))
                });
            }
            NeoSort::ApproachDate => {
                result.sort_by_key(|n| n.approach_date().unwrap_or(NaiveDate::MAX));
            }
        }

        result
    }

    pub fn stats(&self) -> CatalogStats {
        let total = self.objects.len();
        let hazardous = self
            .objects
            .iter()
            .filter(|n| n.is_potentially_hazardous)
            .count();
        let close_approaches = self
            .objects
            .iter()
            .filter(|n| n.distance < PHA_DISTANCE_THRESHOLD_KM)
            .count();
        let avg_velocity_km_s = self
            .objects
            .iter()
            .map(|n| n.relative_velocity_or(0.0))
            .sum::<f64>()
            / total as f64;
        let max_diameter_km = self.objects.iter().map(|n| n.diameter).fold(0.0, f64::max);
        let min_distance_km = self
            .objects
            .iter()
            .map(|n| n.distance)
            .fold(f64::INFINITY, f64::min);

        CatalogStats {
            total,
            hazardous,
            close_approaches,
            avg_velocity_km_s,
            max_diameter_km,
            min_distance_km,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
