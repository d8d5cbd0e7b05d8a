use std::error::Error;
use std::fmt;
use std::io;

use nalgebra::DVector;

use crate::model::{Ensemble, SimError, SimParams};
use super::integrator::step;

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Persistence collaborator: called once per completed step with the current
/// state. Owns the output format; the core never serializes anything itself.
pub trait Recorder {
    fn record(&mut self, ensemble: &Ensemble, params: &SimParams) -> io::Result<()>;
}

/// Recorder that discards everything. Useful for headless or benchmark runs.
pub struct NullRecorder;

impl Recorder for NullRecorder {
    fn record(&mut self, _ensemble: &Ensemble, _params: &SimParams) -> io::Result<()> {
        Ok(())
    }
}

/// Termination collaborator: called once per completed step, after the
/// recorder. Its verdict is written to `params.finished` by the loop.
pub trait StopCondition {
    fn is_finished(&mut self, ensemble: &Ensemble, params: &SimParams) -> bool;
}

/// Stop after a fixed number of completed steps.
pub struct StepLimit {
    max_steps: usize,
    taken: usize,
}

impl StepLimit {
    pub fn new(max_steps: usize) -> Self {
        Self {
            max_steps,
            taken: 0,
        }
    }
}

impl StopCondition for StepLimit {
    fn is_finished(&mut self, _ensemble: &Ensemble, _params: &SimParams) -> bool {
        self.taken += 1;
        self.taken >= self.max_steps
    }
}

/// Stop once the accumulated simulated time reaches `t_max` seconds.
pub struct ElapsedTime {
    t_max: f64,
    elapsed: f64,
}

impl ElapsedTime {
    pub fn new(t_max: f64) -> Self {
        Self {
            t_max,
            elapsed: 0.0,
        }
    }
}

impl StopCondition for ElapsedTime {
    fn is_finished(&mut self, _ensemble: &Ensemble, params: &SimParams) -> bool {
        self.elapsed += params.dt;
        self.elapsed >= self.t_max
    }
}

// ---------------------------------------------------------------------------
// Run errors
// ---------------------------------------------------------------------------

/// Anything that can abort a run: a physics error from the core, or an I/O
/// failure from the recorder.
#[derive(Debug)]
pub enum RunError {
    Physics(SimError),
    Record(io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Physics(e) => write!(f, "physics error: {}", e),
            RunError::Record(e) => write!(f, "recorder error: {}", e),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RunError::Physics(e) => Some(e),
            RunError::Record(e) => Some(e),
        }
    }
}

impl From<SimError> for RunError {
    fn from(e: SimError) -> Self {
        RunError::Physics(e)
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Record(e)
    }
}

// ---------------------------------------------------------------------------
// Driver loop
// ---------------------------------------------------------------------------

/// The main simulation loop. Per iteration, in this order: physics step,
/// recorder, termination check. Stops when the check sets
/// `params.finished`. Any error aborts immediately; the state after a
/// partial update is not well-defined for resumption.
///
/// Returns the number of completed steps.
pub fn run_loop(
    ensemble: &mut Ensemble,
    params: &mut SimParams,
    recorder: &mut dyn Recorder,
    stop: &mut dyn StopCondition,
) -> Result<usize, RunError> {
    let mut steps = 0;

    while !params.finished {
        step(ensemble, params)?;

        recorder.record(ensemble, params)?;

        params.finished = stop.is_finished(ensemble, params);
        steps += 1;
    }

    Ok(steps)
}

// ---------------------------------------------------------------------------
// In-memory convenience run
// ---------------------------------------------------------------------------

/// One recorded instant of the run.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub step: usize,
    pub time: f64, // s, simulated
    pub positions: Vec<DVector<f64>>,
    pub velocities: Vec<DVector<f64>>,
}

/// Run for a fixed number of steps, collecting per-step snapshots in memory
/// (the initial state included). Convenience wrapper over `run_loop`.
pub fn simulate(
    ensemble: &mut Ensemble,
    params: &mut SimParams,
    max_steps: usize,
) -> Result<Vec<Snapshot>, SimError> {
    let mut trajectory = Vec::with_capacity(max_steps + 1);
    trajectory.push(Snapshot {
        step: 0,
        time: 0.0,
        positions: ensemble.positions.clone(),
        velocities: ensemble.velocities.clone(),
    });

    let mut stop = StepLimit::new(max_steps);
    while !params.finished {
        step(ensemble, params)?;

        let n = trajectory.len();
        trajectory.push(Snapshot {
            step: n,
            time: n as f64 * params.dt,
            positions: ensemble.positions.clone(),
            velocities: ensemble.velocities.clone(),
        });

        params.finished = stop.is_finished(ensemble, params);
    }

    Ok(trajectory)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    const G: f64 = 6.67e-11;

    fn small_system() -> (Ensemble, SimParams) {
        let ensemble = Ensemble::new(
            vec![1.0e30, 2.0e30],
            vec![dvector![0.0, 0.0], dvector![1.0e11, 0.0]],
            vec![dvector![0.0, 0.0], dvector![0.0, 1.0e3]],
        )
        .unwrap();
        let params = SimParams::new(G, 1.0e4, 2, 2).unwrap();
        (ensemble, params)
    }

    /// Recorder that just counts invocations.
    struct CountingRecorder(usize);

    impl Recorder for CountingRecorder {
        fn record(&mut self, _e: &Ensemble, _p: &SimParams) -> io::Result<()> {
            self.0 += 1;
            Ok(())
        }
    }

    #[test]
    fn loop_runs_until_step_limit() {
        let (mut ensemble, mut params) = small_system();
        let mut recorder = CountingRecorder(0);
        let mut stop = StepLimit::new(7);

        let steps = run_loop(&mut ensemble, &mut params, &mut recorder, &mut stop).unwrap();
        assert_eq!(steps, 7);
        assert!(params.finished);
    }

    #[test]
    fn recorder_called_once_per_step() {
        let (mut ensemble, mut params) = small_system();
        let mut recorder = CountingRecorder(0);
        let mut stop = StepLimit::new(5);

        run_loop(&mut ensemble, &mut params, &mut recorder, &mut stop).unwrap();
        assert_eq!(recorder.0, 5);
    }

    #[test]
    fn elapsed_time_stop_counts_simulated_seconds() {
        let (mut ensemble, mut params) = small_system();
        let mut recorder = NullRecorder;
        // dt = 1e4 s, so 3.5e4 s of simulated time takes 4 steps
        let mut stop = ElapsedTime::new(3.5e4);

        let steps = run_loop(&mut ensemble, &mut params, &mut recorder, &mut stop).unwrap();
        assert_eq!(steps, 4);
    }

    #[test]
    fn physics_error_aborts_the_run() {
        let mut ensemble = Ensemble::new(
            vec![1.0, 1.0],
            vec![dvector![0.0, 0.0], dvector![0.0, 0.0]],
            vec![dvector![0.0, 0.0], dvector![0.0, 0.0]],
        )
        .unwrap();
        let mut params = SimParams::new(G, 1.0, 2, 2).unwrap();
        let mut recorder = CountingRecorder(0);
        let mut stop = StepLimit::new(100);

        let err = run_loop(&mut ensemble, &mut params, &mut recorder, &mut stop).unwrap_err();
        assert!(matches!(
            err,
            RunError::Physics(SimError::DegenerateInput { .. })
        ));
        // Nothing recorded: physics failed before the recorder ran
        assert_eq!(recorder.0, 0);
    }

    #[test]
    fn recorder_error_aborts_the_run() {
        struct FailingRecorder;
        impl Recorder for FailingRecorder {
            fn record(&mut self, _e: &Ensemble, _p: &SimParams) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
        }

        let (mut ensemble, mut params) = small_system();
        let mut stop = StepLimit::new(100);
        let err =
            run_loop(&mut ensemble, &mut params, &mut FailingRecorder, &mut stop).unwrap_err();
        assert!(matches!(err, RunError::Record(_)));
    }

    #[test]
    fn simulate_collects_initial_plus_per_step_snapshots() {
        let (mut ensemble, mut params) = small_system();
        let trajectory = simulate(&mut ensemble, &mut params, 10).unwrap();

        assert_eq!(trajectory.len(), 11);
        assert_eq!(trajectory[0].step, 0);
        assert_eq!(trajectory[0].time, 0.0);
        assert_eq!(trajectory[10].step, 10);
        assert!((trajectory[10].time - 10.0 * params.dt).abs() < 1e-9);
    }

    #[test]
    fn simulate_snapshots_track_motion() {
        let (mut ensemble, mut params) = small_system();
        let trajectory = simulate(&mut ensemble, &mut params, 3).unwrap();

        let first = &trajectory[0];
        let last = trajectory.last().unwrap();
        let moved = first
            .positions
            .iter()
            .zip(&last.positions)
            .any(|(a, b)| (a - b).norm() > 0.0);
        assert!(moved);
    }
}
