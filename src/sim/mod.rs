pub mod driver;
pub mod job;
pub mod workload;

pub use driver::{RunSummary, Sim};
pub use job::{Job, JobFeed, JobId, parse_jobs, read_jobs};
pub use workload::{WorkloadParams, generate};

use crate::{
    config::{PolicyKind, SimConfig},
    error::SimError,
    scheduler::{Fcfs, Policy, RoundRobin, Sjf},
};

fn run<P: Policy>(jobs: Vec<Job>, config: &SimConfig) -> Result<RunSummary, SimError> {
    Ok(Sim::<P>::new(jobs, config)?.run())
}

/// Runs `jobs` to completion under the policy chosen at runtime.
pub fn simulate(
    kind: PolicyKind,
    jobs: Vec<Job>,
    config: &SimConfig,
) -> Result<RunSummary, SimError> {
    match kind {
        PolicyKind::Fcfs => run::<Fcfs>(jobs, config),
        PolicyKind::Sjf => run::<Sjf>(jobs, config),
        PolicyKind::Rr => run::<RoundRobin>(jobs, config),
    }
}
