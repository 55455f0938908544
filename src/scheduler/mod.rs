pub mod fifo;
pub mod rr;
pub mod sjf;

use crate::{
    config::SimConfig,
    core::{CpuCtx, Process},
    error::ConfigError,
};
pub use fifo::Fcfs;
pub use rr::RoundRobin;
pub use sjf::Sjf;

/// Dispatch policy plugged into the shared stepping loop.
///
/// The loop owns every state transition; a policy only decides how the
/// ready queue is ordered before each decision and whether the running
/// head must give up the CPU.
pub trait Policy {
    const NAME: &'static str;

    fn init(config: &SimConfig) -> Result<Self, ConfigError>
    where
        Self: Sized;

    fn reorder_ready(&mut self, _ctx: &mut CpuCtx) {}

    fn should_preempt(&self, _head: &Process) -> bool {
        false
    }

    // Periodic queue snapshots are only reported for some policies
    fn emits_snapshots(&self) -> bool {
        false
    }
}
