pub mod integrator;
pub mod runner;
pub mod scenario;

pub use integrator::{advance_positions, advance_velocities, step};
pub use runner::{
    run_loop, simulate, ElapsedTime, NullRecorder, Recorder, RunError, Snapshot, StepLimit,
    StopCondition,
};
