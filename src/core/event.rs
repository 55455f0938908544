use super::state::{CpuSnapshot, Ticks};
use crate::{sim::JobId, stats::JobStats};

#[derive(Debug, Clone, PartialEq)]
pub enum SchedEvent {
    Admitted {
        job: JobId,
    },
    Started {
        job: JobId,
    },
    // One CPU cycle given to `job`
    Ran {
        job: JobId,
    },
    Blocked {
        job: JobId,
        io_completion: Ticks,
    },
    Unblocked {
        job: JobId,
    },
    Preempted {
        job: JobId,
    },
    Completed(JobStats),
    // Ready queue empty; the clock advanced with nothing on the CPU
    CpuIdle,
    // Nothing in memory under gated admission; the clock jumped to `clock`
    IdleUntil {
        clock: Ticks,
    },
    Snapshot(CpuSnapshot),
}
