use serde::Serialize;

/// Running totals over a piloting session; reported once the frame stream
/// ends.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct CycleMetrics {
    cycles: usize,
    drops: usize,
}

impl CycleMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cycle(&mut self) {
        self.cycles += 1;
    }

    pub fn record_drop(&mut self) {
        self.drops += 1;
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn drops(&self) -> usize {
        self.drops
    }
}
