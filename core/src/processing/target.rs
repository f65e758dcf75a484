use crate::processing::tracker::ObjectTracker;

/// An unresolved object only pulls the vehicle this far off the centerline.
const UNKNOWN_APPROACH_CLAMP: f32 = 12.0;

/// Picks the lateral offset both strategies steer toward.
///
/// Default is the centerline (drive the lateral error to zero). The nearest
/// unknown object overrides it as a scouting cue, clamped so the vehicle only
/// leans toward it; a delivery site overrides the unknown whenever it is at
/// least as near.
pub fn steering_target(tracker: &ObjectTracker) -> f32 {
    let mut target = 0.0;

    let nearest_unknown = tracker.nearest_unknown();
    if let Some(unknown) = nearest_unknown {
        target = unknown
            .y
            .clamp(-UNKNOWN_APPROACH_CLAMP, UNKNOWN_APPROACH_CLAMP);
    }
    if let Some(site) = tracker.nearest_site() {
        let site_wins = nearest_unknown.map_or(true, |unknown| site.x <= unknown.x);
        if site_wins {
            target = site.y;
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::Point;
    use crate::prelude::PilotConfig;

    #[test]
    fn default_target_is_the_centerline() {
        assert_eq!(steering_target(&ObjectTracker::new()), 0.0);
    }

    #[test]
    fn unknown_pull_is_clamped() {
        let mut tracker = ObjectTracker::new();
        tracker.note_unknown(Point::new(150.0, 20.0));
        assert_eq!(steering_target(&tracker), 12.0);
        tracker.clear_unknowns();
        tracker.note_unknown(Point::new(150.0, -20.0));
        assert_eq!(steering_target(&tracker), -12.0);
    }

    #[test]
    fn nearer_site_overrides_unknown() {
        let config = PilotConfig::default();
        let mut tracker = ObjectTracker::new();
        tracker.note_unknown(Point::new(160.0, 8.0));
        tracker.try_register_site(Point::new(150.0, -4.0), &config);
        assert_eq!(steering_target(&tracker), -4.0);
    }

    #[test]
    fn nearer_unknown_keeps_priority_over_site() {
        let config = PilotConfig::default();
        let mut tracker = ObjectTracker::new();
        tracker.note_unknown(Point::new(140.0, 8.0));
        tracker.try_register_site(Point::new(150.0, -4.0), &config);
        assert_eq!(steering_target(&tracker), 8.0);
    }
}
