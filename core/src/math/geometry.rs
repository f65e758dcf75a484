use serde::{Deserialize, Serialize};

/// Angular offset of beam 0 from the vehicle's local frame, in degrees.
/// Beam `i` points at `i + 75` degrees; beam 15 is the forward beam.
pub const BEAM_ANGLE_OFFSET_DEG: f32 = 75.0;

/// Position in the field plane: `x` downrange (increases as the vehicle
/// advances), `y` cross-track (cylindrical, wraps with the field period).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Point) -> f32 {
        self.distance_sq(other).sqrt()
    }
}

/// Folds a raw cross-track value into the display interval
/// `(-half_width, half_width]`.
pub fn fold_cross_track(value: f32, half_width: f32) -> f32 {
    let folded = value.rem_euclid(2.0 * half_width);
    if folded > half_width {
        folded - 2.0 * half_width
    } else {
        folded
    }
}

/// Converts one range sample into field coordinates. Pure.
pub fn beam_to_cartesian(position: Point, index: usize, range: f32, half_width: f32) -> Point {
    let angle = (index as f32 + BEAM_ANGLE_OFFSET_DEG).to_radians();
    Point {
        x: position.x + range * angle.sin(),
        y: fold_cross_track(position.y + range * angle.cos(), half_width),
    }
}

/// Fits a circle of known `radius` through two boundary range samples and
/// returns its center.
///
/// `None` means insufficient geometric evidence (negative discriminant or a
/// degenerate chord), not an error; callers treat it as no detection this
/// cycle.
pub fn fit_circle(
    position: Point,
    edge1: (usize, f32),
    edge2: (usize, f32),
    radius: f32,
    half_width: f32,
) -> Option<Point> {
    let mut p1 = beam_to_cartesian(position, edge1.0, edge1.1, half_width);
    let mut p2 = beam_to_cartesian(position, edge2.0, edge2.1, half_width);

    // An apparent separation beyond the half-width means the chord straddles
    // the wrap boundary; unwrap the negative side so the chord lives in one
    // continuous coordinate patch.
    if (p1.y - p2.y).abs() > half_width {
        if p1.y < 0.0 {
            p1.y += 2.0 * half_width;
        } else {
            p2.y += 2.0 * half_width;
        }
    }

    let mid = Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0);

    if p1.x == p2.x {
        // Vertical chord: the center sits on the horizontal through the
        // midpoint, solved directly from the circle equation.
        let y = mid.y;
        let disc = radius * radius - (p2.y - y) * (p2.y - y);
        if disc < 0.0 {
            return None;
        }
        return Some(Point {
            x: p2.x + disc.sqrt(),
            y: fold_cross_track(y, half_width),
        });
    }

    let slope = (p1.y - p2.y) / (p1.x - p2.x);
    let d = p2.y - mid.y - mid.x / slope;

    let a = 1.0 + 1.0 / (slope * slope);
    let b = 2.0 * (d / slope - p2.x);
    let c = d * d + p2.x * p2.x - radius * radius;
    let delta = b * b - 4.0 * a * c;

    // A non-finite delta arises from a horizontal chord (slope 0); both it
    // and a negative discriminant mean no usable center.
    if !delta.is_finite() || delta < 0.0 {
        return None;
    }

    let x = (-b - delta.sqrt()) / (2.0 * a);
    let y = fold_cross_track((x - mid.x) / (-slope) + mid.y, half_width);
    Some(Point { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF_WIDTH: f32 = 25.0;

    #[test]
    fn fold_keeps_half_open_interval() {
        assert_eq!(fold_cross_track(25.0, HALF_WIDTH), 25.0);
        assert_eq!(fold_cross_track(26.0, HALF_WIDTH), -24.0);
        assert_eq!(fold_cross_track(-26.0, HALF_WIDTH), 24.0);
        assert_eq!(fold_cross_track(75.0, HALF_WIDTH), 25.0);
    }

    #[test]
    fn forward_beam_maps_straight_downrange() {
        let p = beam_to_cartesian(Point::new(100.0, 2.0), 15, 20.0, HALF_WIDTH);
        assert!((p.x - 120.0).abs() < 1e-4);
        assert!((p.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn side_beams_fold_across_the_boundary() {
        // Beam 30 points at 105 degrees; from y = -24 the return lands past
        // the -25 edge and must fold to the positive side.
        let p = beam_to_cartesian(Point::new(0.0, -24.0), 30, 10.0, HALF_WIDTH);
        assert!(p.y > 0.0);
        assert!(p.y <= HALF_WIDTH);
    }

    #[test]
    fn fit_returns_none_when_chord_exceeds_diameter() {
        // Two edge returns ~7 units apart cannot sit on a radius-3 circle.
        let center = fit_circle(Point::new(0.0, 0.0), (5, 20.0), (25, 20.0), 3.0, HALF_WIDTH);
        assert!(center.is_none());
    }

    #[test]
    fn fit_handles_vertical_chord() {
        // A zero-length chord shares its downrange coordinate exactly; the
        // center sits one radius deeper along the beam.
        let center = fit_circle(Point::new(0.0, 0.0), (15, 40.0), (15, 40.0), 3.0, HALF_WIDTH)
            .expect("chord fits");
        assert!((center.x - 43.0).abs() < 1e-3);
        assert!(center.y.abs() < 1e-3);
    }

    #[test]
    fn fitted_center_lies_at_radius_from_both_edges() {
        let position = Point::new(0.0, 0.0);
        let edge1 = (13, 40.0);
        let edge2 = (16, 41.0);
        let center = fit_circle(position, edge1, edge2, 3.0, HALF_WIDTH).expect("chord fits");
        let p1 = beam_to_cartesian(position, edge1.0, edge1.1, HALF_WIDTH);
        let p2 = beam_to_cartesian(position, edge2.0, edge2.1, HALF_WIDTH);
        assert!((center.distance(&p1) - 3.0).abs() < 1e-2);
        assert!((center.distance(&p2) - 3.0).abs() < 1e-2);
    }

    #[test]
    fn fit_never_panics_on_degenerate_chords() {
        // Horizontal chord (equal y, unequal x) has an undefined slope term.
        let _ = fit_circle(Point::new(0.0, 0.0), (12, 39.0), (18, 39.0), 3.0, HALF_WIDTH);
    }
}
