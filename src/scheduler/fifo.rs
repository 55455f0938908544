use super::{Policy, SimConfig};
use crate::error::ConfigError;

/// First-come-first-served: the ready queue is never reordered.
pub struct Fcfs;

impl Policy for Fcfs {
    const NAME: &'static str = "FCFS";

    fn init(_config: &SimConfig) -> Result<Self, ConfigError> {
        Ok(Self)
    }

    fn emits_snapshots(&self) -> bool {
        true
    }
}
