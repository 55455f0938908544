use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::{
    config::{AdmissionMode, PolicyKind, SimConfig},
    sim::WorkloadParams,
};

/// Single-CPU scheduling simulator (FCFS, SJF, round robin)
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Dispatch policy
    #[arg(value_enum, ignore_case = true)]
    pub policy: PolicyKind,

    /// Job file: `<id> <arrival> <num_bursts> <burst>...` per line
    #[arg(required_unless_present = "generate")]
    pub jobs: Option<PathBuf>,

    /// Time quantum for round robin
    #[arg(short, long, allow_negative_numbers = true)]
    pub quantum: Option<i64>,

    /// Run a synthetic workload with this many arrival ticks instead of a file
    #[arg(long, value_name = "TICKS", conflicts_with = "jobs")]
    pub generate: Option<u64>,

    /// Seed for the synthetic workload
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Hold jobs back until the clock reaches their arrival time
    #[arg(long)]
    pub gate_arrivals: bool,

    /// Do not report periodic queue snapshots
    #[arg(long)]
    pub no_snapshots: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn sim_config(&self) -> SimConfig {
        let mut config = SimConfig::default();
        if let Some(quantum) = self.quantum {
            config = config.with_quantum(quantum);
        }
        if self.gate_arrivals {
            config = config.with_admission(AdmissionMode::ArrivalGated);
        }
        if self.no_snapshots {
            config.snapshot_interval = None;
        }
        config
    }

    pub fn workload(&self) -> Option<WorkloadParams> {
        self.generate.map(|ticks| WorkloadParams {
            ticks,
            ..WorkloadParams::default()
        })
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
