use nalgebra::{dvector, DVector};
use rand::Rng;

use crate::model::{Ensemble, SimError, SimParams, G_SI};

// ---------------------------------------------------------------------------
// Canned initial conditions (the setup collaborator)
// ---------------------------------------------------------------------------

/// Sun-and-planet system in the orbital plane: a solar-mass body at the
/// origin and an Earth-mass body at 1 AU on a circular orbit
/// (v = sqrt(G·M/r)). Two dimensions are enough since the motion stays in
/// the plane.
pub fn sun_and_planet(dt: f64) -> Result<(Ensemble, SimParams), SimError> {
    let m_sun = 1.989e30; // kg
    let m_planet = 5.972e24; // kg
    let r = 1.496e11; // m, 1 AU
    let v_circular = (G_SI * m_sun / r).sqrt();

    let ensemble = Ensemble::new(
        vec![m_sun, m_planet],
        vec![dvector![0.0, 0.0], dvector![r, 0.0]],
        vec![dvector![0.0, 0.0], dvector![0.0, v_circular]],
    )?;
    let params = SimParams::new(G_SI, dt, 2, 2)?;
    Ok((ensemble, params))
}

/// Stellar-mass random cloud: `n` bodies with masses in [1e33, 3e33) kg,
/// positions in [0, 3e13) m per axis, and velocities in [-3e6, 3e6) m/s.
pub fn random_cloud(n: usize, dim: usize, dt: f64) -> Result<(Ensemble, SimParams), SimError> {
    let mut rng = rand::thread_rng();

    let masses = (0..n).map(|_| rng.gen_range(1.0e33..3.0e33)).collect();
    let positions = (0..n)
        .map(|_| DVector::from_fn(dim, |_, _| rng.gen_range(0.0..3.0e13)))
        .collect();
    let velocities = (0..n)
        .map(|_| DVector::from_fn(dim, |_, _| rng.gen_range(-3.0e6..3.0e6)))
        .collect();

    let ensemble = Ensemble::new(masses, positions, velocities)?;
    let params = SimParams::new(G_SI, dt, dim, n)?;
    Ok((ensemble, params))
}
