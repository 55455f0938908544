use crate::{core::Ticks, error::ConfigError};

pub const MEMORY_CAPACITY: usize = 10;
pub const IO_TIME: Ticks = 10;
pub const SNAPSHOT_INTERVAL: Ticks = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyKind {
    /// First-come-first-served
    Fcfs,
    /// Shortest current burst first
    Sjf,
    /// Round robin with a fixed quantum
    Rr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdmissionMode {
    /// Admit whenever memory allows, ignoring arrival times
    #[default]
    Capacity,
    /// Admit only once the clock has reached the job's arrival time
    ArrivalGated,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub memory_capacity: usize,
    pub io_time: Ticks,
    // Signed so that a bad value from the command line can be reported as-is
    pub quantum: Option<i64>,
    pub snapshot_interval: Option<Ticks>,
    pub admission: AdmissionMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            memory_capacity: MEMORY_CAPACITY,
            io_time: IO_TIME,
            quantum: None,
            snapshot_interval: Some(SNAPSHOT_INTERVAL),
            admission: AdmissionMode::Capacity,
        }
    }
}

impl SimConfig {
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    pub fn with_admission(mut self, admission: AdmissionMode) -> Self {
        self.admission = admission;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.io_time == 0 {
            return Err(ConfigError::ZeroIoTime);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_hardware() {
        let config = SimConfig::default();
        assert_eq!(config.memory_capacity, 10);
        assert_eq!(config.io_time, 10);
        assert_eq!(config.snapshot_interval, Some(200));
        assert_eq!(config.admission, AdmissionMode::Capacity);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = SimConfig {
            memory_capacity: 0,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCapacity)));
    }
}
