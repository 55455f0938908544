use tracing::info;

use super::job::{Job, JobFeed};
use crate::{
    config::{AdmissionMode, SimConfig},
    core::{CpuSnapshot, SchedCore, SchedEvent, Ticks},
    error::SimError,
    scheduler::Policy,
    stats::{Averages, JobStats, StatsAccumulator},
};

/// Everything a finished run reports.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub policy: &'static str,
    pub records: Vec<JobStats>,
    pub averages: Option<Averages>,
    pub final_clock: Ticks,
    pub jobs_completed: usize,
    pub io_wait_total: Ticks,
    pub peak_memory: usize,
    pub snapshots: Vec<CpuSnapshot>,
}

pub struct Sim<P: Policy> {
    pub core: SchedCore<P>,
    feed: JobFeed,
    admission: AdmissionMode,
    stats: StatsAccumulator,
    records: Vec<JobStats>,
    snapshots: Vec<CpuSnapshot>,
}

impl<P: Policy> Sim<P> {
    /// Validates the configuration and the feed up front; nothing runs if
    /// either is bad.
    pub fn new(jobs: Vec<Job>, config: &SimConfig) -> Result<Self, SimError> {
        let core = SchedCore::<P>::new(config)?;
        let feed = JobFeed::new(jobs)?;

        Ok(Self {
            core,
            feed,
            admission: config.admission,
            stats: StatsAccumulator::new(),
            records: Vec::new(),
            snapshots: Vec::new(),
        })
    }

    /// Admits as many jobs as memory allows, then runs one dispatch step.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        if self.is_finished() {
            return Vec::new();
        }

        let mut events = self.handle_arrivals();
        let dispatched = self.core.step();

        for event in &dispatched {
            match event {
                SchedEvent::Completed(stats) => {
                    self.stats.merge(stats);
                    self.records.push(*stats);
                }
                SchedEvent::Snapshot(snapshot) => self.snapshots.push(*snapshot),
                _ => {}
            }
        }

        events.extend(dispatched);
        events
    }

    fn handle_arrivals(&mut self) -> Vec<SchedEvent> {
        let mut events = Vec::new();
        self.admit_ready_jobs(&mut events);

        // Gated with nothing in memory: the next arrival is the next event
        if self.admission == AdmissionMode::ArrivalGated {
            let next_arrival = self.feed.peek().map(|job| job.arrival_time);
            if let Some(at) = next_arrival {
                if self.core.ctx.skip_idle_until(at) {
                    events.push(SchedEvent::IdleUntil { clock: at });
                    self.admit_ready_jobs(&mut events);
                }
            }
        }
        events
    }

    fn admit_ready_jobs(&mut self, events: &mut Vec<SchedEvent>) {
        while let Some(job) = self.core.ctx.admit_next(&mut self.feed) {
            events.push(SchedEvent::Admitted { job });
        }
    }

    pub fn is_finished(&self) -> bool {
        self.core.ctx.jobs_in_memory() == 0 && self.feed.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.feed.len()
    }

    pub fn records(&self) -> &[JobStats] {
        &self.records
    }

    pub fn snapshots(&self) -> &[CpuSnapshot] {
        &self.snapshots
    }

    pub fn run(mut self) -> RunSummary {
        while !self.is_finished() {
            self.step();
        }
        self.into_summary()
    }

    fn into_summary(self) -> RunSummary {
        let ctx = &self.core.ctx;
        let summary = RunSummary {
            policy: P::NAME,
            averages: self.stats.averages(),
            final_clock: ctx.now,
            jobs_completed: ctx.jobs_complete(),
            io_wait_total: ctx.io_wait_total(),
            peak_memory: self.core.observer().peak_memory(),
            records: self.records,
            snapshots: self.snapshots,
        };

        info!(
            policy = summary.policy,
            clock = summary.final_clock,
            completed = summary.jobs_completed,
            "simulation finished"
        );
        summary
    }
}
