use tracing::{info, warn};

use super::{
    event::SchedEvent,
    observer::Observer,
    process::Process,
    state::{CpuCtx, Ticks},
};
use crate::{config::SimConfig, error::ConfigError, scheduler::Policy};

// What the loop does with the ready head this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Start,
    Complete,
    BlockForIo,
    Preempt,
    Service,
}

pub struct SchedCore<P: Policy> {
    pub(crate) ctx: CpuCtx,
    pub(crate) policy: P,
    snapshot_interval: Option<Ticks>,
    observer: Observer,
}

impl<P: Policy> SchedCore<P> {
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let policy = P::init(config)?;
        Ok(Self {
            ctx: CpuCtx::new(config),
            policy,
            snapshot_interval: config.snapshot_interval.filter(|&n| n > 0),
            observer: Observer::new(),
        })
    }

    /// Runs one iteration of the dispatch loop against the ready head.
    ///
    /// Completion, blocking and preemption leave the clock alone so the next
    /// head is examined at the same instant; servicing a cycle, or finding
    /// nothing ready, advances it by one.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        let mut events = Vec::new();

        self.policy.reorder_ready(&mut self.ctx);

        let decision = match self.ctx.head() {
            Some(head) => self.decide(head),
            None => {
                events.push(SchedEvent::CpuIdle);
                self.advance_clock(&mut events);
                self.observer.observe(&self.ctx);
                return events;
            }
        };

        match decision {
            Decision::Complete => {
                if let Some(stats) = self.ctx.complete_job() {
                    info!(
                        job = stats.id,
                        clock = stats.end_time,
                        turnaround = stats.turnaround_time,
                        waiting = stats.waiting_time,
                        shots = stats.shots_used,
                        "job complete"
                    );
                    if stats.turnaround_time < 0 {
                        warn!(
                            job = stats.id,
                            arrival = stats.arrival_time,
                            "job completed before its arrival time"
                        );
                    }
                    events.push(SchedEvent::Completed(stats));
                }
            }
            Decision::BlockForIo => {
                if let Some((job, io_completion)) = self.ctx.block_for_io() {
                    events.push(SchedEvent::Blocked { job, io_completion });
                }
            }
            Decision::Preempt => {
                if let Some(job) = self.ctx.preempt_head() {
                    events.push(SchedEvent::Preempted { job });
                }
            }
            Decision::Start | Decision::Service => {
                if let Some((job, first)) = self.ctx.service_one_cycle() {
                    if first {
                        events.push(SchedEvent::Started { job });
                    }
                    events.push(SchedEvent::Ran { job });
                }
                self.advance_clock(&mut events);
                self.maybe_snapshot(&mut events);
            }
        }

        self.observer.observe(&self.ctx);
        events
    }

    fn decide(&self, head: &Process) -> Decision {
        if !head.has_started() {
            Decision::Start
        } else if head.burst_exhausted() {
            if head.on_final_burst() {
                Decision::Complete
            } else {
                Decision::BlockForIo
            }
        } else if self.policy.should_preempt(head) {
            Decision::Preempt
        } else {
            Decision::Service
        }
    }

    fn advance_clock(&mut self, events: &mut Vec<SchedEvent>) {
        if let Some(job) = self.ctx.tick() {
            events.push(SchedEvent::Unblocked { job });
        }
    }

    fn maybe_snapshot(&mut self, events: &mut Vec<SchedEvent>) {
        if !self.policy.emits_snapshots() {
            return;
        }
        let Some(interval) = self.snapshot_interval else {
            return;
        };

        let now = self.ctx.now;
        if now != 0 && now % interval == 0 {
            let snapshot = self.ctx.snapshot();
            info!(
                clock = snapshot.clock,
                ready = snapshot.ready,
                io_blocked = snapshot.io_blocked,
                completed = snapshot.completed,
                "cpu state"
            );
            events.push(SchedEvent::Snapshot(snapshot));
        }
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    /// Read-only view of the machine; it changes only through `step`.
    pub fn ctx(&self) -> &CpuCtx {
        &self.ctx
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
