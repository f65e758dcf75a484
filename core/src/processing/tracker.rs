use crate::math::geometry::Point;
use crate::prelude::PilotConfig;

/// Matching radius inside which a new tree detection overwrites an existing
/// tree's position (first detections are the least accurate).
const TREE_MERGE_RADIUS: f32 = 8.0;

/// Two trees closer than this collapse into one during the dedup pass.
const TREE_DEDUP_RADIUS: f32 = 7.0;

/// Trees stay tracked until the vehicle is this far past them; the slack
/// absorbs fit error in the tracked center.
const TREE_RETENTION_MARGIN: f32 = 10.0;

/// Persistent store of classified objects.
///
/// Trees and delivery sites survive across cycles; unknowns are rebuilt every
/// cycle from fresh evidence. `last_drop` records the downrange coordinate of
/// the previous package release and starts at negative infinity so the first
/// drop window is never pre-suppressed.
#[derive(Debug, Clone)]
pub struct ObjectTracker {
    trees: Vec<Point>,
    sites: Vec<Point>,
    unknowns: Vec<Point>,
    last_drop: f32,
}

impl ObjectTracker {
    pub fn new() -> Self {
        Self {
            trees: Vec::new(),
            sites: Vec::new(),
            unknowns: Vec::new(),
            last_drop: f32::NEG_INFINITY,
        }
    }

    pub fn trees(&self) -> &[Point] {
        &self.trees
    }

    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn unknowns(&self) -> &[Point] {
        &self.unknowns
    }

    /// Drops objects the vehicle has advanced past, bounding memory to
    /// objects still reachable: sites once the vehicle is a site radius past
    /// them, trees once it is `TREE_RETENTION_MARGIN` past.
    pub fn prune(&mut self, vehicle_x: f32, config: &PilotConfig) {
        let site_bound = vehicle_x - config.site_radius;
        self.sites.retain(|site| site.x >= site_bound);
        let tree_bound = vehicle_x - TREE_RETENTION_MARGIN;
        self.trees.retain(|tree| tree.x >= tree_bound);
    }

    /// If `point` matches an existing tree within the merge radius, overwrite
    /// that tree's position with the newer, more accurate fix.
    pub fn refresh_matching_tree(&mut self, point: Point) -> bool {
        let radius_sq = TREE_MERGE_RADIUS * TREE_MERGE_RADIUS;
        for tree in &mut self.trees {
            if tree.distance_sq(&point) < radius_sq {
                *tree = point;
                return true;
            }
        }
        false
    }

    /// Records a confirmed tree. Returns true when the tree is new; a new
    /// tree supersedes any site within twice the site radius.
    pub fn register_tree(&mut self, point: Point, config: &PilotConfig) -> bool {
        if self.refresh_matching_tree(point) {
            return false;
        }
        self.trees.push(point);
        let guard_sq = (2.0 * config.site_radius).powi(2);
        self.sites.retain(|site| site.distance_sq(&point) >= guard_sq);
        true
    }

    /// Records a delivery site unless it overlaps an existing site or tree
    /// within twice the site radius. Returns true when accepted.
    pub fn try_register_site(&mut self, point: Point, config: &PilotConfig) -> bool {
        let guard = 2.0 * config.site_radius;
        if near_any(&point, &self.sites, guard) || near_any(&point, &self.trees, guard) {
            return false;
        }
        self.sites.push(point);
        true
    }

    /// Collapses trees within the dedup radius of each other, keeping the
    /// earliest-seen entry. Transient re-detections otherwise leave
    /// duplicates behind.
    pub fn dedup_trees(&mut self) {
        let mut kept: Vec<Point> = Vec::with_capacity(self.trees.len());
        for tree in self.trees.drain(..) {
            if !near_any(&tree, &kept, TREE_DEDUP_RADIUS) {
                kept.push(tree);
            }
        }
        self.trees = kept;
    }

    pub fn clear_unknowns(&mut self) {
        self.unknowns.clear();
    }

    pub fn note_unknown(&mut self, point: Point) {
        self.unknowns.push(point);
    }

    pub fn site_within(&self, point: &Point, radius: f32) -> bool {
        near_any(point, &self.sites, radius)
    }

    pub fn nearest_site(&self) -> Option<Point> {
        nearest(&self.sites)
    }

    pub fn nearest_unknown(&self) -> Option<Point> {
        nearest(&self.unknowns)
    }

    /// Nearest site together with its list index, for consumption on drop.
    pub fn nearest_site_indexed(&self) -> Option<(usize, Point)> {
        self.sites
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x))
            .map(|(index, point)| (index, *point))
    }

    pub fn remove_site(&mut self, index: usize) {
        self.sites.remove(index);
    }

    pub fn last_drop(&self) -> f32 {
        self.last_drop
    }

    pub fn record_drop(&mut self, vehicle_x: f32) {
        self.last_drop = vehicle_x;
    }
}

impl Default for ObjectTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn near_any(point: &Point, list: &[Point], radius: f32) -> bool {
    let radius_sq = radius * radius;
    list.iter().any(|other| other.distance_sq(point) < radius_sq)
}

fn nearest(list: &[Point]) -> Option<Point> {
    list.iter().copied().min_by(|a, b| a.x.total_cmp(&b.x))
}
