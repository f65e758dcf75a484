pub mod geometry;

pub use geometry::{beam_to_cartesian, fit_circle, fold_cross_track, Point};
