use crate::prelude::{PilotConfig, SteeringStrategy};
use crate::processing::target::steering_target;
use crate::processing::tracker::ObjectTracker;
use crate::sim_interface::frame::Frame;

/// Lateral half-width of the danger band around a tree. Wider than the trunk
/// radius to absorb fit error in the tracked center.
const DANGER_HALF_WIDTH: f32 = 5.0;

/// Forward-beam range above which the path directly ahead counts as clear.
const FORWARD_CLEAR_RANGE: f32 = 15.0;

/// Avoidance planner that reasons in absolute lateral offsets: trees within
/// braking range project danger bands on the cross-track axis, and the
/// planner searches the reachable band for a clear offset near the target.
pub struct ZonalStrategy {
    config: PilotConfig,
}

impl ZonalStrategy {
    pub fn new(config: PilotConfig) -> Self {
        Self { config }
    }

    fn is_safe(&self, offset: f32, zones: &[f32]) -> bool {
        let half_width = self.config.half_width;
        zones.iter().all(|&zone| {
            offset < (zone - DANGER_HALF_WIDTH).max(-half_width)
                || offset > (zone + DANGER_HALF_WIDTH).min(half_width)
        })
    }

    /// Walks outward one unit at a time until a safe offset appears or the
    /// reachable band runs out.
    fn find_safe(
        &self,
        start: f32,
        zones: &[f32],
        reachable: (f32, f32),
        direction: f32,
    ) -> Option<f32> {
        let mut offset = start;
        loop {
            if offset < reachable.0 || offset > reachable.1 {
                return None;
            }
            if self.is_safe(offset, zones) {
                return Some(offset);
            }
            offset += direction;
        }
    }

    /// Walks from the current offset toward the target, stopping at the last
    /// safe position before the first unsafe one. Bounded local search, not
    /// path planning.
    fn walk_toward(&self, start: f32, target: f32, zones: &[f32], direction: f32) -> f32 {
        let mut offset = start;
        while self.is_safe(offset, zones) && (offset - target) * direction <= 0.0 {
            offset += direction;
        }
        offset - direction
    }
}

fn forward_clear(frame: &Frame) -> bool {
    let range = frame.forward_range();
    range == 0.0 || range > FORWARD_CLEAR_RANGE
}

impl SteeringStrategy for ZonalStrategy {
    fn lateral_command(&self, frame: &Frame, tracker: &ObjectTracker) -> f32 {
        let position = frame.position;
        let wind_y = frame.wind.y;
        let max_airspeed = self.config.max_airspeed;
        let mut target = steering_target(tracker);

        // One danger band per tree close enough to matter within the next
        // interval.
        let zones: Vec<f32> = tracker
            .trees()
            .iter()
            .filter(|tree| tree.x < position.x + max_airspeed)
            .map(|tree| tree.y)
            .collect();

        if !zones.is_empty() {
            // Lateral extent reachable before the next frame.
            let reachable = (
                (-self.config.half_width).max(position.y - max_airspeed - wind_y),
                self.config.half_width.min(position.y + max_airspeed - wind_y),
            );

            if self.is_safe(position.y, &zones) && forward_clear(frame) {
                let direction = if target > position.y { 1.0 } else { -1.0 };
                target = self.walk_toward(position.y, target, &zones, direction);
            } else if forward_clear(frame) {
                // Already inside a band but nothing directly ahead: hold
                // position rather than advance deeper.
                target = position.y;
            } else {
                // Obstacle dead ahead: search both directions for the
                // nearest clear offset and commit fully to one side.
                let left = self.find_safe(position.y - 1.0, &zones, reachable, -1.0);
                let right = self.find_safe(position.y + 1.0, &zones, reachable, 1.0);
                target = match (left, right) {
                    (None, None) => {
                        if (target - reachable.0).abs() < (target - reachable.1).abs() {
                            -max_airspeed
                        } else {
                            max_airspeed
                        }
                    }
                    (Some(_), None) => -max_airspeed,
                    (None, Some(_)) => max_airspeed,
                    (Some(left), Some(right)) => {
                        if (left - position.y).abs() < (right - position.y).abs() {
                            -max_airspeed
                        } else {
                            max_airspeed
                        }
                    }
                };
            }
        }

        (-target + position.y - wind_y).clamp(-max_airspeed, max_airspeed)
    }
}
