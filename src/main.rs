use std::error::Error;
use std::fs::File;
use std::io;

use nbody_sim::io::CsvRecorder;
use nbody_sim::model::{Ensemble, SimParams};
use nbody_sim::sim::{run_loop, scenario, Recorder, StepLimit};

const AU: f64 = 1.496e11; // m
const DAY: f64 = 86_400.0; // s

/// CSV recorder that also keeps a sampled orbit log for the printed report.
struct OrbitLog {
    csv: CsvRecorder<File>,
    samples: Vec<(f64, f64, f64)>, // (t days, r in AU, speed m/s)
    steps_seen: usize,
    sample_every: usize,
}

impl Recorder for OrbitLog {
    fn record(&mut self, ensemble: &Ensemble, params: &SimParams) -> io::Result<()> {
        self.csv.record(ensemble, params)?;

        self.steps_seen += 1;
        if self.steps_seen % self.sample_every == 0 {
            let r = (&ensemble.positions[1] - &ensemble.positions[0]).norm();
            let speed = ensemble.velocities[1].norm();
            let t_days = self.steps_seen as f64 * params.dt / DAY;
            self.samples.push((t_days, r / AU, speed));
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // -----------------------------------------------------------------------
    // Scenario: sun and planet, one simulated year at one step per day
    // -----------------------------------------------------------------------
    let (mut ensemble, mut params) = scenario::sun_and_planet(DAY)?;
    let steps = 365;

    let r0 = (&ensemble.positions[1] - &ensemble.positions[0]).norm();
    let v0 = ensemble.velocities[1].norm();

    let out_path = "trajectory.csv";
    let mut recorder = OrbitLog {
        csv: CsvRecorder::create(out_path)?,
        samples: Vec::new(),
        steps_seen: 0,
        sample_every: 30,
    };
    let mut stop = StepLimit::new(steps);

    // -----------------------------------------------------------------------
    // Run
    // -----------------------------------------------------------------------
    let completed = run_loop(&mut ensemble, &mut params, &mut recorder, &mut stop)?;

    let r1 = (&ensemble.positions[1] - &ensemble.positions[0]).norm();
    let v1 = ensemble.velocities[1].norm();

    // -----------------------------------------------------------------------
    // Report
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  N-BODY SIMULATION — sun and planet");
    println!("====================================================================");
    println!();
    println!("  System");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Particles:     {:>8}       Dimensions:   {:>8}",
        params.n_particles, params.dim
    );
    println!(
        "  G:             {:>12.4e}   dt:           {:>8.0} s",
        params.g, params.dt
    );
    println!(
        "  Sun mass:      {:>12.4e} kg  Planet mass:  {:>12.4e} kg",
        ensemble.masses[0], ensemble.masses[1]
    );
    println!();

    println!("  Orbit samples");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  {:>9}  {:>10}  {:>12}", "t (days)", "r (AU)", "speed (m/s)");
    for (t, r, speed) in &recorder.samples {
        println!("  {:>9.0}  {:>10.6}  {:>12.1}", t, r, speed);
    }
    println!();

    println!("  Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Steps:         {:>8}", completed);
    println!(
        "  Radius:        {:>10.6} AU  →  {:>10.6} AU  (drift {:+.3}%)",
        r0 / AU,
        r1 / AU,
        (r1 - r0) / r0 * 100.0
    );
    println!(
        "  Planet speed:  {:>10.1} m/s →  {:>10.1} m/s",
        v0, v1
    );
    println!("  Trajectory written to {}", out_path);
    println!("====================================================================");
    println!();

    Ok(())
}
