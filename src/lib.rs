pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;
pub mod stats;

pub use config::{AdmissionMode, PolicyKind, SimConfig};
pub use error::SimError;
pub use scheduler::Policy;
pub use sim::{Job, RunSummary, Sim, simulate};
pub use stats::{Averages, JobStats, StatsAccumulator};
