use crate::math::geometry::Point;
use crate::prelude::PilotConfig;
use crate::processing::tracker::ObjectTracker;
use crate::sim_interface::frame::Frame;

/// Seconds of travel the package needs from release to ground track.
const DROP_LEAD_TIME: f32 = 0.4;

/// Decides when to release a package over the nearest delivery site.
///
/// The drop fires inside a fixed time-to-target window sized to the site's
/// radius; `ObjectTracker::last_drop` enforces a cooldown of two site radii
/// of downrange travel between releases.
pub struct DropScheduler {
    config: PilotConfig,
}

impl DropScheduler {
    pub fn new(config: PilotConfig) -> Self {
        Self { config }
    }

    /// Returns true when a package should be released this cycle; on fire
    /// the consumed site leaves the pending list.
    pub fn decide(&self, frame: &Frame, lateral_airspeed: f32, tracker: &mut ObjectTracker) -> bool {
        let cooldown = 2.0 * self.config.site_radius;
        if frame.position.x < tracker.last_drop() + cooldown {
            return false;
        }
        let (index, site) = match tracker.nearest_site_indexed() {
            Some(found) => found,
            None => return false,
        };

        let distance = frame.position.distance(&site);
        let ground_speed = ground_speed(frame, lateral_airspeed, self.config.max_airspeed);
        let lead = DROP_LEAD_TIME * ground_speed;

        if lead <= distance && distance <= lead + self.config.site_radius {
            tracker.record_drop(frame.position.x);
            tracker.remove_site(index);
            return true;
        }
        false
    }
}

fn ground_speed(frame: &Frame, lateral_airspeed: f32, forward_airspeed: f32) -> f32 {
    let forward = forward_airspeed + frame.wind.x;
    let lateral = lateral_airspeed + frame.wind.y;
    (forward * forward + lateral * lateral).sqrt()
}
