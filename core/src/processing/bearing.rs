use crate::prelude::{PilotConfig, SteeringStrategy};
use crate::processing::target::steering_target;
use crate::processing::tracker::ObjectTracker;
use crate::sim_interface::frame::{Frame, BEAM_COUNT, FORWARD_BEAM};

/// The beam array covers steering angles in [-15, 15] degrees.
const MAX_BEARING_DEG: i32 = 15;

/// A beam return at or beyond this range (or no return at all) counts as a
/// clear bearing.
const CLEAR_BEAM_RANGE: f32 = 30.0;

/// Avoidance planner that reasons in steering angle: it converts the lateral
/// target into a desired bearing and scans the raw beam array outward from it
/// for the nearest clear direction.
pub struct BearingStrategy {
    config: PilotConfig,
}

impl BearingStrategy {
    pub fn new(config: PilotConfig) -> Self {
        Self { config }
    }
}

/// Scans from `start` in one-degree steps until a clear beam appears or the
/// field of view runs out.
fn clear_bearing(samples: &[f32; BEAM_COUNT], start: i32, step: i32) -> Option<i32> {
    let mut angle = start;
    while (-MAX_BEARING_DEG..=MAX_BEARING_DEG).contains(&angle) {
        let range = samples[(FORWARD_BEAM as i32 - angle) as usize];
        if range >= CLEAR_BEAM_RANGE || range == 0.0 {
            return Some(angle);
        }
        angle += step;
    }
    None
}

impl SteeringStrategy for BearingStrategy {
    fn lateral_command(&self, frame: &Frame, tracker: &ObjectTracker) -> f32 {
        let max_airspeed = self.config.max_airspeed;
        let forward_speed = max_airspeed + frame.wind.x;
        let target_offset = steering_target(tracker);

        let target_angle = (target_offset - frame.position.y)
            .atan2(forward_speed)
            .to_degrees()
            .round()
            .clamp(-(MAX_BEARING_DEG as f32), MAX_BEARING_DEG as f32) as i32;

        let left = clear_bearing(&frame.samples, target_angle, -1);
        let right = clear_bearing(&frame.samples, target_angle, 1);
        let angle = match (left, right) {
            // Nothing clear in the whole field of view: maximum deflection.
            (None, None) => MAX_BEARING_DEG,
            (Some(left), None) => left,
            (None, Some(right)) => right,
            (Some(left), Some(right)) => {
                if (left - target_angle).abs() < (right - target_angle).abs() {
                    left
                } else {
                    right
                }
            }
        };

        (-(angle as f32).to_radians().tan() * forward_speed - frame.wind.y)
            .clamp(-max_airspeed, max_airspeed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::Point;

    fn frame_at(position: Point, wind: Point) -> Frame {
        Frame {
            timestamp: 0,
            position,
            wind,
            samples: [0.0; BEAM_COUNT],
        }
    }

    fn strategy() -> BearingStrategy {
        BearingStrategy::new(PilotConfig::default())
    }

    #[test]
    fn clear_field_follows_the_target_bearing() {
        let tracker = ObjectTracker::new();
        // Target 0 from y = 0: bearing 0, so only the crosswind is trimmed.
        let frame = frame_at(Point::new(100.0, 0.0), Point::new(0.0, 1.5));
        let command = strategy().lateral_command(&frame, &tracker);
        assert_eq!(command, -1.5);
    }

    #[test]
    fn target_bearing_is_clamped_to_the_field_of_view() {
        let config = PilotConfig::default();
        let mut tracker = ObjectTracker::new();
        tracker.try_register_site(Point::new(140.0, 24.0), &config);
        let frame = frame_at(Point::new(100.0, -24.0), Point::new(0.0, 0.0));
        let command = strategy().lateral_command(&frame, &tracker);
        // atan2(48, 30) is far past 15 degrees; the command saturates at the
        // maximum deflection for a 15-degree bearing.
        let expected = -(15.0f32.to_radians().tan()) * 30.0;
        assert!((command - expected).abs() < 1e-4);
    }

    #[test]
    fn blocked_center_beams_deflect_to_nearest_clear_bearing() {
        let tracker = ObjectTracker::new();
        let mut frame = frame_at(Point::new(100.0, 0.0), Point::new(0.0, 0.0));
        // Beams for bearings -2..=0 read a close obstacle; +1 and left -3
        // are clear, so the nearer deviation wins.
        for bearing in -2i32..=0 {
            frame.samples[(FORWARD_BEAM as i32 - bearing) as usize] = 12.0;
        }
        let command = strategy().lateral_command(&frame, &tracker);
        let expected = -(1.0f32.to_radians().tan()) * 30.0;
        assert!((command - expected).abs() < 1e-4);
    }

    #[test]
    fn fully_blocked_view_takes_maximum_deflection() {
        let tracker = ObjectTracker::new();
        let mut frame = frame_at(Point::new(100.0, 0.0), Point::new(0.0, 0.0));
        frame.samples = [5.0; BEAM_COUNT];
        let command = strategy().lateral_command(&frame, &tracker);
        let expected = (-(15.0f32.to_radians().tan()) * 30.0).clamp(-30.0, 30.0);
        assert!((command - expected).abs() < 1e-4);
    }

    #[test]
    fn command_stays_clamped_under_strong_wind() {
        let tracker = ObjectTracker::new();
        let mut frame = frame_at(Point::new(100.0, 0.0), Point::new(20.0, 20.0));
        frame.samples = [5.0; BEAM_COUNT];
        let command = strategy().lateral_command(&frame, &tracker);
        assert!(command >= -30.0 && command <= 30.0);
        assert_eq!(command, -30.0);
    }
}
