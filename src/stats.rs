use crate::{core::Ticks, sim::JobId};

/// Final statistics of one completed job.
///
/// Turnaround and waiting time are signed: under capacity-only admission a
/// job may finish before its recorded arrival time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobStats {
    pub id: JobId,
    pub arrival_time: Ticks,
    pub start_time: Ticks,
    pub end_time: Ticks,
    pub processing_time: i64,
    pub waiting_time: i64,
    pub turnaround_time: i64,
    pub shots_used: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Averages {
    pub processing_time: f64,
    pub waiting_time: f64,
    pub turnaround_time: f64,
    pub shots_used: f64,
}

#[derive(Debug, Default, Clone)]
pub struct StatsAccumulator {
    processing_time: i64,
    waiting_time: i64,
    turnaround_time: i64,
    shots: u64,
    samples: u64,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, stats: &JobStats) {
        self.processing_time += stats.processing_time;
        self.waiting_time += stats.waiting_time;
        self.turnaround_time += stats.turnaround_time;
        self.shots += stats.shots_used;
        self.samples += 1;
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    // None until at least one job has been merged
    pub fn averages(&self) -> Option<Averages> {
        if self.samples == 0 {
            return None;
        }

        let n = self.samples as f64;
        Some(Averages {
            processing_time: self.processing_time as f64 / n,
            waiting_time: self.waiting_time as f64 / n,
            turnaround_time: self.turnaround_time as f64 / n,
            shots_used: self.shots as f64 / n,
        })
    }
}
