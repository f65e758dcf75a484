//! Decision core for the autonomous delivery-vehicle pilot.
//!
//! Each control cycle the host simulator hands the pilot a fixed-size
//! telemetry frame (inertial error, wind estimate, a 31-beam forward ranging
//! array). The modules here turn that frame into a lateral-airspeed command
//! and a drop decision: clustering and classifying range returns, tracking
//! trees and delivery sites across cycles, steering around danger bands, and
//! timing the package release.

pub mod math;
pub mod prelude;
pub mod processing;
pub mod sim_interface;
pub mod telemetry;

pub use prelude::{PilotConfig, PilotError, PilotResult, SteeringStrategy, StrategyKind};
