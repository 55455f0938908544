use super::state::{CpuCtx, Ticks};
use super::process::ProcessState;

/// Checks machine invariants after every step and tracks peak memory use.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    peak_memory: usize,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn peak_memory(&self) -> usize {
        self.peak_memory
    }

    pub fn observe(&mut self, ctx: &CpuCtx) {
        self.step += 1;
        self.peak_memory = self.peak_memory.max(ctx.jobs_in_memory());

        debug_assert!(
            ctx.jobs_in_memory() <= ctx.capacity(),
            "{} jobs in memory exceeds capacity {}",
            ctx.jobs_in_memory(),
            ctx.capacity()
        );
        debug_assert_eq!(
            ctx.ready.len() + ctx.io_blocked.len(),
            ctx.jobs_in_memory(),
            "Every job in memory must sit in exactly one queue"
        );
        debug_assert_eq!(
            ctx.procs.len(),
            ctx.jobs_in_memory(),
            "Process table out of sync with memory count"
        );

        for (pos, &key) in ctx.ready.iter().enumerate() {
            let proc = ctx.proc(key);
            debug_assert!(
                matches!(proc.state, ProcessState::Ready | ProcessState::Running),
                "Process {} in ready queue has state {:?}",
                proc.id,
                proc.state
            );
            debug_assert!(
                pos == 0 || proc.state != ProcessState::Running,
                "Process {} is Running but not at the head",
                proc.id
            );
        }

        let mut last_completion: Option<Ticks> = None;
        for &key in &ctx.io_blocked {
            let proc = ctx.proc(key);
            debug_assert_eq!(
                proc.state,
                ProcessState::IoBlocked,
                "Process {} in I/O queue is not blocked",
                proc.id
            );
            if let Some(prev) = last_completion {
                debug_assert!(
                    proc.io_completion() > prev,
                    "Process {} would finish I/O out of FIFO order",
                    proc.id
                );
            }
            last_completion = Some(proc.io_completion());
        }
    }
}
