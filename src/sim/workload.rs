use rand::prelude::*;

use super::job::Job;
use crate::core::state::Ticks;

#[derive(Debug, Clone)]
pub struct WorkloadParams {
    /// Arrival window; one Bernoulli trial per tick
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
    pub max_bursts: usize,
}

impl Default for WorkloadParams {
    fn default() -> Self {
        Self {
            ticks: 200,
            p_arrival: 0.2,
            p_short: 0.6,
            short_burst: 3,
            long_burst: 12,
            max_bursts: 4,
        }
    }
}

/// Deterministic synthetic feed: the same params and seed always produce
/// the same jobs, numbered from 1 in arrival order.
pub fn generate(params: &WorkloadParams, seed: u64) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();
    let max_bursts = params.max_bursts.max(1);

    for t in 0..params.ticks {
        if rng.random::<f64>() >= params.p_arrival {
            continue;
        }

        let num_bursts = rng.random_range(1..=max_bursts);
        let bursts = (0..num_bursts)
            .map(|_| {
                let burst = if rng.random::<f64>() < params.p_short {
                    params.short_burst
                } else {
                    params.long_burst
                };
                burst.max(1)
            })
            .collect();

        jobs.push(Job {
            id: jobs.len() as u64 + 1,
            arrival_time: t,
            bursts,
        });
    }

    jobs
}
