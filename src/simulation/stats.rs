//! Run counters for the intersection simulation

/// Snapshot of the simulation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimStats {
    pub total_cars_spawned: usize,
    pub total_cars_completed: usize,
    pub active_cars: usize,
    pub steps: u32,
    pub crashes: u32,
}

impl SimStats {
    /// Share of spawned cars that made it through, in percent
    pub fn success_rate(&self) -> f32 {
        if self.total_cars_spawned > 0 {
            (self.total_cars_completed as f32 / self.total_cars_spawned as f32) * 100.0
        } else {
            0.0
        }
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// Every goal car has left the grid
    GoalReached,
    /// The hard step cap was hit
    StepLimit,
    /// A collision happened and crashes are not ignored
    Crash,
}
