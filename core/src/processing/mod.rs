pub mod bearing;
pub mod classifier;
pub mod drop;
pub mod target;
pub mod tracker;
pub mod zonal;

pub use bearing::BearingStrategy;
pub use classifier::Classifier;
pub use drop::DropScheduler;
pub use tracker::ObjectTracker;
pub use zonal::ZonalStrategy;
