use serde::{Deserialize, Serialize};

use crate::processing::tracker::ObjectTracker;
use crate::sim_interface::Frame;

/// Tunables shared across the perception and planning stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotConfig {
    /// Maximum commandable lateral airspeed; also the assumed forward airspeed.
    pub max_airspeed: f32,
    /// Lidar cross-section radius of a tree trunk.
    pub tree_lidar_radius: f32,
    /// Lidar cross-section radius of a delivery-site marker.
    pub site_lidar_radius: f32,
    /// Radius of the delivery site itself (drop tolerance).
    pub site_radius: f32,
    /// Half-width of the cylindrical cross-track field; raw coordinates wrap
    /// with period `2 * half_width`.
    pub half_width: f32,
    /// Log every newly registered tree.
    pub log_trees: bool,
    /// Log every newly registered delivery site.
    pub log_sites: bool,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            max_airspeed: 30.0,
            tree_lidar_radius: 3.0,
            site_lidar_radius: 0.5,
            site_radius: 5.0,
            half_width: 25.0,
            log_trees: false,
            log_sites: false,
        }
    }
}

/// Which steering strategy drives the avoidance planner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Reasons in absolute lateral offsets and danger bands.
    #[default]
    Zonal,
    /// Reasons in steering angle against the raw beam array.
    Bearing,
}

/// Common error type for the pilot pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PilotError {
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type PilotResult<T> = Result<T, PilotError>;

/// Trait describing the per-cycle steering decision.
///
/// Strategies read the current frame and the accumulated object tracker and
/// return a lateral airspeed, already clamped to the vehicle's limits. They
/// never mutate the tracker; persistent state lives in the tracker alone.
pub trait SteeringStrategy {
    fn lateral_command(&self, frame: &Frame, tracker: &ObjectTracker) -> f32;
}
