pub mod driver;
pub mod event;
pub mod observer;
pub mod process;
pub mod state;

pub use driver::SchedCore;
pub use event::SchedEvent;
pub use observer::Observer;
pub use process::{Process, ProcessState};
pub use state::{CpuCtx, CpuSnapshot, ProcKey, Ticks};
