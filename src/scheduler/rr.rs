use std::num::NonZeroU64;

use super::{Policy, Process, SimConfig};
use crate::error::ConfigError;

pub struct RoundRobin {
    quantum: NonZeroU64,
}

impl RoundRobin {
    pub fn quantum(&self) -> NonZeroU64 {
        self.quantum
    }
}

impl Policy for RoundRobin {
    const NAME: &'static str = "RR";

    fn init(config: &SimConfig) -> Result<Self, ConfigError> {
        let quantum = config.quantum.ok_or(ConfigError::MissingQuantum)?;
        let quantum = u64::try_from(quantum)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or(ConfigError::InvalidQuantum(quantum))?;
        Ok(Self { quantum })
    }

    fn should_preempt(&self, head: &Process) -> bool {
        head.quantum_cycles() >= self.quantum.get()
    }
}
