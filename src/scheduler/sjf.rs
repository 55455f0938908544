use super::{CpuCtx, Policy, SimConfig};
use crate::{core::ProcessState, error::ConfigError};

/// Shortest current burst first, non-preemptive within a burst.
pub struct Sjf;

impl Policy for Sjf {
    const NAME: &'static str = "SJF";

    fn init(_config: &SimConfig) -> Result<Self, ConfigError> {
        Ok(Self)
    }

    // Only re-sort between bursts; a Running head keeps the CPU
    fn reorder_ready(&mut self, ctx: &mut CpuCtx) {
        if ctx
            .head()
            .is_some_and(|head| head.state == ProcessState::Ready)
        {
            ctx.sort_ready_by_shortest_burst();
        }
    }
}
