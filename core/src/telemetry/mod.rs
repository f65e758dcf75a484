pub mod metrics;

pub use metrics::CycleMetrics;
