use log::info;

use crate::math::geometry::{beam_to_cartesian, fit_circle, Point};
use crate::prelude::PilotConfig;
use crate::processing::tracker::ObjectTracker;
use crate::sim_interface::frame::{Frame, BEAM_COUNT};

/// Beams 0, 1, 29 and 30 sit at the field-of-view boundary and are too
/// unreliable to cluster.
const FIRST_USABLE_BEAM: usize = 2;
const LAST_USABLE_BEAM: usize = 28;

/// Range jump beyond which adjacent returns belong to different objects.
const CLUSTER_RANGE_JUMP: f32 = 2.0;

/// Fitted centers closer than this to the vehicle are numerically unstable
/// and rejected outright.
const MIN_FIT_DISTANCE: f32 = 30.0;

/// Contiguous run of positive range samples, as (beam index, range) pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub beams: Vec<(usize, f32)>,
}

impl Cluster {
    pub fn first(&self) -> Option<(usize, f32)> {
        self.beams.first().copied()
    }

    pub fn last(&self) -> Option<(usize, f32)> {
        self.beams.last().copied()
    }

    pub fn max_range(&self) -> f32 {
        self.beams.iter().map(|beam| beam.1).fold(0.0, f32::max)
    }
}

/// Outcome of classifying one cluster. `Unknown` is a legitimate result
/// pending more evidence, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectClass {
    Tree,
    Site,
    Unknown,
}

/// Groups the usable beams into clusters: a positive sample extends the
/// current cluster while it stays within `CLUSTER_RANGE_JUMP` of the previous
/// nonzero sample; a zero sample or a larger jump closes it.
pub fn cluster_samples(samples: &[f32; BEAM_COUNT]) -> Vec<Cluster> {
    let mut clusters = Vec::new();
    let mut current: Vec<(usize, f32)> = Vec::new();
    let mut previous = 0.0f32;

    for index in FIRST_USABLE_BEAM..=LAST_USABLE_BEAM {
        let range = samples[index];
        if range > 0.0 {
            if previous == 0.0 || (range - previous).abs() <= CLUSTER_RANGE_JUMP {
                current.push((index, range));
            } else {
                clusters.push(Cluster {
                    beams: std::mem::take(&mut current),
                });
                current.push((index, range));
            }
        } else if !current.is_empty() {
            clusters.push(Cluster {
                beams: std::mem::take(&mut current),
            });
        }
        previous = range;
    }
    if !current.is_empty() {
        clusters.push(Cluster { beams: current });
    }
    clusters
}

/// Classifies a cluster from its beam count: a wide trunk subtends more
/// beams at a given range than a small site marker ever could, and vice
/// versa; counts in between are ambiguous.
pub fn classify(cluster: &Cluster, config: &PilotConfig) -> ObjectClass {
    // Angular resolution of adjacent beams projected to arc length.
    let accuracy = 2.0 * 0.5f32.to_radians().sin();
    let max_range = cluster.max_range();
    let beam_count = cluster.beams.len() as f32;

    let site_bound = ((2.0 * config.site_lidar_radius) / (max_range * accuracy)).ceil() + 1.0;
    let tree_bound = ((2.0 * config.tree_lidar_radius) / (accuracy * max_range)).floor() - 1.0;

    if beam_count > site_bound {
        ObjectClass::Tree
    } else if beam_count < tree_bound {
        ObjectClass::Site
    } else {
        ObjectClass::Unknown
    }
}

/// Per-cycle perception stage: prunes the tracker, clusters the frame's
/// samples, classifies each cluster, and folds the evidence into the
/// tracker.
pub struct Classifier {
    config: PilotConfig,
}

impl Classifier {
    pub fn new(config: PilotConfig) -> Self {
        Self { config }
    }

    pub fn process(&self, frame: &Frame, tracker: &mut ObjectTracker) {
        tracker.prune(frame.position.x, &self.config);
        tracker.clear_unknowns();

        for cluster in cluster_samples(&frame.samples) {
            let (first, last) = match (cluster.first(), cluster.last()) {
                (Some(first), Some(last)) => (first, last),
                _ => continue,
            };
            match classify(&cluster, &self.config) {
                ObjectClass::Tree => self.track_tree(frame, first, last, tracker),
                ObjectClass::Site => self.track_site(frame, first, tracker),
                ObjectClass::Unknown => self.track_unknown(frame, first, last, tracker),
            }
        }

        tracker.dedup_trees();
    }

    fn track_tree(
        &self,
        frame: &Frame,
        first: (usize, f32),
        last: (usize, f32),
        tracker: &mut ObjectTracker,
    ) {
        let center = match fit_circle(
            frame.position,
            first,
            last,
            self.config.tree_lidar_radius,
            self.config.half_width,
        ) {
            Some(center) => center,
            None => return,
        };
        if center.x <= frame.position.x + MIN_FIT_DISTANCE {
            return;
        }
        if tracker.register_tree(center, &self.config) && self.config.log_trees {
            info!(
                "tree at ({:.1}, {:.1}), vehicle x {:.1}",
                center.x, center.y, frame.position.x
            );
        }
    }

    fn track_site(&self, frame: &Frame, first: (usize, f32), tracker: &mut ObjectTracker) {
        // Sites are close enough that the first sample's direct coordinate
        // suffices; no circle fit.
        let point = beam_to_cartesian(frame.position, first.0, first.1, self.config.half_width);
        if tracker.try_register_site(point, &self.config) && self.config.log_sites {
            info!("site at ({:.1}, {:.1})", point.x, point.y);
        }
    }

    fn track_unknown(
        &self,
        frame: &Frame,
        first: (usize, f32),
        last: (usize, f32),
        tracker: &mut ObjectTracker,
    ) {
        let candidate = beam_to_cartesian(frame.position, first.0, first.1, self.config.half_width);
        if tracker.site_within(&candidate, 2.0 * self.config.site_radius) {
            return;
        }
        if candidate.x <= frame.position.x + MIN_FIT_DISTANCE {
            return;
        }
        // Only keep ambiguous evidence that at least admits a tree-sized
        // circle; a fit that matches a tracked tree refreshes it instead.
        let center = match fit_circle(
            frame.position,
            first,
            last,
            self.config.tree_lidar_radius,
            self.config.half_width,
        ) {
            Some(center) => center,
            None => return,
        };
        if tracker.refresh_matching_tree(center) {
            return;
        }
        tracker.note_unknown(candidate);
    }
}
