use std::io::{Read, Write};

use log::debug;
use pilotcore::prelude::{PilotConfig, SteeringStrategy, StrategyKind};
use pilotcore::processing::{
    BearingStrategy, Classifier, DropScheduler, ObjectTracker, ZonalStrategy,
};
use pilotcore::sim_interface::{Command, Frame};
use pilotcore::telemetry::CycleMetrics;

/// Owns the full perception-planning pipeline for one piloting session and
/// runs it one frame at a time: classify into the tracker, steer, schedule
/// the drop.
pub struct CyclePilot {
    classifier: Classifier,
    strategy: Box<dyn SteeringStrategy>,
    scheduler: DropScheduler,
    tracker: ObjectTracker,
    metrics: CycleMetrics,
}

impl CyclePilot {
    pub fn new(config: PilotConfig, kind: StrategyKind) -> Self {
        let strategy: Box<dyn SteeringStrategy> = match kind {
            StrategyKind::Zonal => Box::new(ZonalStrategy::new(config.clone())),
            StrategyKind::Bearing => Box::new(BearingStrategy::new(config.clone())),
        };
        Self {
            classifier: Classifier::new(config.clone()),
            strategy,
            scheduler: DropScheduler::new(config),
            tracker: ObjectTracker::new(),
            metrics: CycleMetrics::new(),
        }
    }

    /// Executes one control cycle.
    pub fn step(&mut self, frame: &Frame) -> Command {
        self.classifier.process(frame, &mut self.tracker);
        let lateral_airspeed = self.strategy.lateral_command(frame, &self.tracker);
        let drop = self
            .scheduler
            .decide(frame, lateral_airspeed, &mut self.tracker);

        self.metrics.record_cycle();
        if drop {
            self.metrics.record_drop();
        }
        debug!(
            "cycle {} -> lateral {:.2}, drop {}",
            frame.timestamp, lateral_airspeed, drop
        );
        Command {
            lateral_airspeed,
            drop,
        }
    }

    /// Pilots a full frame stream: one command per frame, flushed
    /// immediately. A short or empty read ends the session cleanly. Returns
    /// the number of cycles flown.
    pub fn run<R: Read, W: Write>(&mut self, reader: &mut R, writer: &mut W) -> anyhow::Result<usize> {
        while let Some(frame) = Frame::read_from(reader)? {
            let command = self.step(&frame);
            command.write_to(writer)?;
            writer.flush()?;
        }
        Ok(self.metrics.cycles())
    }

    pub fn metrics(&self) -> &CycleMetrics {
        &self.metrics
    }

    pub fn tracker(&self) -> &ObjectTracker {
        &self.tracker
    }
}
