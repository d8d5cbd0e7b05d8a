use nalgebra::DVector;

use crate::model::{Ensemble, SimError, SimParams};
use crate::physics::gravity::net_force_on_all;

// ---------------------------------------------------------------------------
// Velocity-Verlet integrator
// ---------------------------------------------------------------------------

fn check_forces(
    forces: &[DVector<f64>],
    params: &SimParams,
    what: &'static str,
) -> Result<(), SimError> {
    if forces.len() != params.n_particles {
        return Err(SimError::DimensionMismatch {
            what,
            expected: params.n_particles,
            found: forces.len(),
        });
    }
    for f in forces {
        if f.len() != params.dim {
            return Err(SimError::DimensionMismatch {
                what,
                expected: params.dim,
                found: f.len(),
            });
        }
    }
    Ok(())
}

/// Advance every position in place by one timestep of constant-acceleration
/// kinematics: pos += vel·dt + ½·(f/m)·dt².
///
/// All particles use the same `forces` snapshot, taken before any position
/// in this call is mutated, so the result is independent of update order.
pub fn advance_positions(
    ensemble: &mut Ensemble,
    params: &SimParams,
    forces: &[DVector<f64>],
) -> Result<(), SimError> {
    ensemble.check_against(params)?;
    check_forces(forces, params, "forces")?;

    let dt = params.dt;
    for i in 0..ensemble.len() {
        let m = ensemble.masses[i];
        if m <= 0.0 {
            return Err(SimError::InvalidParameter {
                name: "mass",
                value: m,
            });
        }
        let accel = &forces[i] / m;
        let delta = &ensemble.velocities[i] * dt + accel * (0.5 * dt * dt);
        ensemble.positions[i] += delta;
    }
    Ok(())
}

/// Advance every velocity in place using the average of the accelerations at
/// the old and new positions: vel += ½·(f_old/m + f_new/m)·dt.
///
/// This is the velocity-Verlet correction that lifts the method to second
/// order in dt over naive Euler integration.
pub fn advance_velocities(
    ensemble: &mut Ensemble,
    params: &SimParams,
    forces_old: &[DVector<f64>],
    forces_new: &[DVector<f64>],
) -> Result<(), SimError> {
    ensemble.check_against(params)?;
    check_forces(forces_old, params, "forces_old")?;
    check_forces(forces_new, params, "forces_new")?;

    let dt = params.dt;
    for i in 0..ensemble.len() {
        let m = ensemble.masses[i];
        if m <= 0.0 {
            return Err(SimError::InvalidParameter {
                name: "mass",
                value: m,
            });
        }
        let accel_old = &forces_old[i] / m;
        let accel_new = &forces_new[i] / m;
        ensemble.velocities[i] += (accel_old + accel_new) * (0.5 * dt);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// One full timestep
// ---------------------------------------------------------------------------

/// Advance the whole system by one timestep:
/// forces at the current positions, position update, forces at the new
/// positions, then the averaged velocity update. The two force evaluations
/// are the O(n²) cost of the step.
pub fn step(ensemble: &mut Ensemble, params: &SimParams) -> Result<(), SimError> {
    let forces_old = net_force_on_all(ensemble, params)?;

    advance_positions(ensemble, params, &forces_old)?;

    let forces_new = net_force_on_all(ensemble, params)?;

    advance_velocities(ensemble, params, &forces_old, &forces_new)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
