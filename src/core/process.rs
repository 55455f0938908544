use super::state::Ticks;
use crate::{
    sim::{Job, JobId},
    stats::JobStats,
};

// Clock values past `i64::MAX` saturate instead of wrapping negative
fn signed(ticks: Ticks) -> i64 {
    i64::try_from(ticks).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Ready,
    Running,
    IoBlocked,
    Complete,
}

/// An admitted job: its burst plan plus all progress counters.
///
/// `current_burst` is 1-based; 0 means the process has never been on the
/// CPU. Every listed burst is a CPU burst, and each one except the last is
/// followed by a fixed-length I/O operation.
#[derive(Debug)]
pub struct Process {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub state: ProcessState,
    bursts: Vec<Ticks>,
    current_burst: usize,
    burst_cycles: Ticks,
    pc: Ticks,
    quantum_cycles: Ticks,
    shots: u64,
    io_completion: Ticks,
    start_time: Option<Ticks>,
    end_time: Option<Ticks>,
}

impl Process {
    pub fn new(job: Job) -> Self {
        debug_assert!(!job.bursts.is_empty(), "Job {} has no bursts", job.id);
        Self {
            id: job.id,
            arrival_time: job.arrival_time,
            state: ProcessState::Ready,
            bursts: job.bursts,
            current_burst: 0,
            burst_cycles: 0,
            pc: 0,
            quantum_cycles: 0,
            shots: 0,
            io_completion: 0,
            start_time: None,
            end_time: None,
        }
    }

    pub fn num_bursts(&self) -> usize {
        self.bursts.len()
    }

    pub fn current_burst(&self) -> usize {
        self.current_burst
    }

    pub fn has_started(&self) -> bool {
        self.current_burst != 0
    }

    // Length of the burst the process is on, or will start with
    pub fn current_burst_len(&self) -> Ticks {
        self.bursts[self.current_burst.max(1) - 1]
    }

    pub fn burst_cycles(&self) -> Ticks {
        self.burst_cycles
    }

    pub fn quantum_cycles(&self) -> Ticks {
        self.quantum_cycles
    }

    pub fn total_cycles(&self) -> Ticks {
        self.pc
    }

    pub fn shots(&self) -> u64 {
        self.shots
    }

    pub fn io_completion(&self) -> Ticks {
        self.io_completion
    }

    pub fn start_time(&self) -> Option<Ticks> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<Ticks> {
        self.end_time
    }

    pub fn burst_exhausted(&self) -> bool {
        self.has_started() && self.burst_cycles == self.current_burst_len()
    }

    pub fn on_final_burst(&self) -> bool {
        self.current_burst == self.bursts.len()
    }

    /// Moves a never-run process onto its first burst.
    pub fn start(&mut self, now: Ticks) {
        debug_assert!(!self.has_started(), "Process {} started twice", self.id);
        self.current_burst = 1;
        self.start_time = Some(now);
    }

    pub fn advance_one_cycle(&mut self) {
        self.burst_cycles += 1;
        self.pc += 1;
        self.quantum_cycles += 1;
        debug_assert!(
            self.burst_cycles <= self.current_burst_len(),
            "Process {} overran burst {}",
            self.id,
            self.current_burst
        );
    }

    /// Finishes a non-final CPU burst and leaves the process waiting on I/O.
    pub fn complete_burst(&mut self) {
        debug_assert!(
            !self.on_final_burst(),
            "Process {} has no burst after {}",
            self.id,
            self.current_burst
        );
        self.current_burst += 1;
        self.shots += 1;
        self.state = ProcessState::IoBlocked;
        self.burst_cycles = 0;
        self.quantum_cycles = 0;
    }

    pub fn reset_quantum(&mut self) {
        self.quantum_cycles = 0;
    }

    pub fn count_shot(&mut self) {
        self.shots += 1;
    }

    pub fn set_io_completion(&mut self, at: Ticks) {
        self.io_completion = at;
    }

    /// Marks the process complete at `end_time` and derives its final stats.
    pub fn finalize(&mut self, end_time: Ticks, io_time: Ticks) -> JobStats {
        debug_assert!(
            self.on_final_burst() && self.burst_exhausted(),
            "Process {} finalized before its last burst finished",
            self.id
        );
        self.state = ProcessState::Complete;
        self.end_time = Some(end_time);

        let io_ops = (self.bursts.len() - 1) as i64;
        let processing_time = signed(self.pc) + signed(io_time) * io_ops;
        let turnaround_time = signed(end_time) - signed(self.arrival_time);

        JobStats {
            id: self.id,
            arrival_time: self.arrival_time,
            start_time: self.start_time.unwrap_or(end_time),
            end_time,
            processing_time,
            waiting_time: turnaround_time - processing_time,
            turnaround_time,
            shots_used: self.shots,
        }
    }
}
