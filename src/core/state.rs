use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;
use tracing::{debug, trace};

use super::process::{Process, ProcessState};
use crate::{
    config::{AdmissionMode, SimConfig},
    sim::{JobFeed, JobId},
    stats::JobStats,
};

pub type Ticks = u64;
new_key_type! {
    pub struct ProcKey;
}

/// Queue occupancy at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub clock: Ticks,
    pub ready: usize,
    pub io_blocked: usize,
    pub completed: usize,
}

/// Single-CPU, single-I/O-device machine state.
///
/// Processes live in `procs`; both queues hold keys into it, so a process is
/// in at most one queue and is dropped from the table when it completes.
#[derive(Debug)]
pub struct CpuCtx {
    pub(crate) now: Ticks,
    pub(crate) procs: SlotMap<ProcKey, Process>,
    pub(crate) ready: VecDeque<ProcKey>,
    pub(crate) io_blocked: VecDeque<ProcKey>,
    capacity: usize,
    io_time: Ticks,
    admission: AdmissionMode,
    jobs_in_memory: usize,
    jobs_complete: usize,
    io_wait_total: Ticks,
}

impl CpuCtx {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            now: 0,
            procs: SlotMap::with_capacity_and_key(config.memory_capacity),
            ready: VecDeque::with_capacity(config.memory_capacity),
            io_blocked: VecDeque::with_capacity(config.memory_capacity),
            capacity: config.memory_capacity,
            io_time: config.io_time,
            admission: config.admission,
            jobs_in_memory: 0,
            jobs_complete: 0,
            io_wait_total: 0,
        }
    }

    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    pub fn io_blocked_len(&self) -> usize {
        self.io_blocked.len()
    }

    /// Job ids in ready-queue order, head first.
    pub fn ready_jobs(&self) -> impl Iterator<Item = JobId> + '_ {
        self.ready.iter().map(|&key| self.procs[key].id)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn io_time(&self) -> Ticks {
        self.io_time
    }

    pub fn jobs_in_memory(&self) -> usize {
        self.jobs_in_memory
    }

    pub fn jobs_complete(&self) -> usize {
        self.jobs_complete
    }

    pub fn io_wait_total(&self) -> Ticks {
        self.io_wait_total
    }

    pub(crate) fn proc(&self, key: ProcKey) -> &Process {
        &self.procs[key]
    }

    pub fn head(&self) -> Option<&Process> {
        self.ready.front().map(|&key| &self.procs[key])
    }

    fn head_mut(&mut self) -> Option<&mut Process> {
        let key = *self.ready.front()?;
        Some(&mut self.procs[key])
    }

    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            clock: self.now,
            ready: self.ready.len(),
            io_blocked: self.io_blocked.len(),
            completed: self.jobs_complete,
        }
    }

    /// Admits the next feed descriptor if memory (and, when gated, the
    /// clock) allows. Declining leaves both the feed and the machine as-is.
    pub fn admit_next(&mut self, feed: &mut JobFeed) -> Option<JobId> {
        if self.jobs_in_memory >= self.capacity {
            return None;
        }
        let next = feed.peek()?;
        if self.admission == AdmissionMode::ArrivalGated && next.arrival_time > self.now {
            return None;
        }

        let job = feed.pop()?;
        let id = job.id;
        let key = self.procs.insert(Process::new(job));
        self.ready.push_back(key);
        self.jobs_in_memory += 1;

        debug!(job = id, clock = self.now, in_memory = self.jobs_in_memory, "admitted");
        Some(id)
    }

    /// Moves the clock straight to `at` when nothing is in memory, so a gated
    /// feed whose next arrival is far off does not spin through idle ticks.
    /// Returns `false` and leaves the clock alone otherwise.
    pub(crate) fn skip_idle_until(&mut self, at: Ticks) -> bool {
        if self.jobs_in_memory != 0 || at <= self.now {
            return false;
        }
        debug!(from = self.now, to = at, "idle until next arrival");
        self.now = at;
        true
    }

    /// Returns the I/O head to the ready queue if its I/O completes at the
    /// current (pre-increment) clock, then advances the clock by one.
    pub fn tick(&mut self) -> Option<JobId> {
        let mut unblocked = None;

        if let Some(&key) = self.io_blocked.front() {
            let proc = &mut self.procs[key];
            if proc.io_completion() == self.now {
                proc.state = ProcessState::Ready;
                unblocked = Some(proc.id);
                self.io_blocked.pop_front();
                self.ready.push_back(key);
                debug!(job = proc.id, clock = self.now, "I/O complete");
            }
        }

        self.now = self.now.saturating_add(1);
        trace!(clock = self.now, "tick");
        unblocked
    }

    /// Moves the ready head onto the I/O device queue. Returns the job and
    /// the tick at which its I/O will complete.
    pub fn block_for_io(&mut self) -> Option<(JobId, Ticks)> {
        let key = self.ready.pop_front()?;

        // One device: wait out the job in service plus a full I/O for every
        // job queued behind it.
        let io_completion = match self.io_blocked.front() {
            Some(&in_service) => {
                let remaining = self.procs[in_service]
                    .io_completion()
                    .saturating_sub(self.now);
                let queued = (self.io_blocked.len() - 1) as Ticks;
                let wait = remaining + queued * self.io_time;
                self.io_wait_total += wait;
                self.now + wait + self.io_time
            }
            None => self.now + self.io_time,
        };

        let proc = &mut self.procs[key];
        proc.complete_burst();
        proc.set_io_completion(io_completion);
        self.io_blocked.push_back(key);

        debug!(job = proc.id, clock = self.now, io_completion, "blocked for I/O");
        Some((proc.id, io_completion))
    }

    /// Retires the ready head, which must have exhausted its final burst.
    pub fn complete_job(&mut self) -> Option<JobStats> {
        let key = self.ready.pop_front()?;
        let mut proc = self.procs.remove(key)?;

        proc.count_shot();
        let stats = proc.finalize(self.now, self.io_time);
        self.jobs_in_memory -= 1;
        self.jobs_complete += 1;

        Some(stats)
    }

    /// Gives the ready head one CPU cycle, starting it if it has never run.
    /// Returns the job and whether this was its very first cycle.
    pub fn service_one_cycle(&mut self) -> Option<(JobId, bool)> {
        let now = self.now;
        let proc = self.head_mut()?;

        let first = !proc.has_started();
        if first {
            proc.start(now);
        }
        proc.state = ProcessState::Running;
        proc.advance_one_cycle();

        trace!(job = proc.id, clock = now, burst = proc.current_burst(), "cycle");
        Some((proc.id, first))
    }

    /// Interrupts the ready head and rotates it to the tail. The interrupted
    /// dispatch still counts as a shot.
    pub fn preempt_head(&mut self) -> Option<JobId> {
        let key = self.ready.pop_front()?;
        let proc = &mut self.procs[key];
        proc.state = ProcessState::Ready;
        proc.reset_quantum();
        proc.count_shot();
        self.ready.push_back(key);

        debug!(job = proc.id, clock = self.now, "preempted");
        Some(proc.id)
    }

    /// Stable sort of the ready queue by the length of each process's
    /// current burst; equal lengths keep their queue order.
    pub fn sort_ready_by_shortest_burst(&mut self) {
        let procs = &self.procs;
        self.ready
            .make_contiguous()
            .sort_by_key(|&key| procs[key].current_burst_len());
    }
}
