use nalgebra::DVector;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::model::{Ensemble, SimError, SimParams};

// ---------------------------------------------------------------------------
// Pairwise gravitational force
// ---------------------------------------------------------------------------

/// Force on the body at `pos1` (mass `m1`) exerted by the body at `pos2`
/// (mass `m2`): G·m1·m2·(pos2 − pos1)/r³, attractive, magnitude G·m1·m2/r².
///
/// Coincident positions make the force undefined and are reported as
/// `DegenerateInput` with call-local indices 0 and 1; callers that know the
/// real ensemble indices remap them.
pub fn pairwise_force(
    m1: f64,
    m2: f64,
    pos1: &DVector<f64>,
    pos2: &DVector<f64>,
    g: f64,
) -> Result<DVector<f64>, SimError> {
    if pos1.len() != pos2.len() {
        return Err(SimError::DimensionMismatch {
            what: "pairwise positions",
            expected: pos1.len(),
            found: pos2.len(),
        });
    }
    if m1 <= 0.0 {
        return Err(SimError::InvalidParameter {
            name: "m1",
            value: m1,
        });
    }
    if m2 <= 0.0 {
        return Err(SimError::InvalidParameter {
            name: "m2",
            value: m2,
        });
    }
    if g <= 0.0 {
        return Err(SimError::InvalidParameter { name: "G", value: g });
    }

    let displacement = pos2 - pos1;
    let distance = displacement.norm();
    if distance == 0.0 {
        return Err(SimError::DegenerateInput { i: 0, j: 1 });
    }

    Ok(displacement * (g * m1 * m2 / (distance * distance * distance)))
}

// ---------------------------------------------------------------------------
// Net force on one particle / on all particles
// ---------------------------------------------------------------------------

/// Net gravitational force on particle `i`: the sum of pairwise forces from
/// every other particle, accumulated in ascending index order. Returns the
/// zero vector for a single-particle system.
pub fn net_force_on(
    i: usize,
    ensemble: &Ensemble,
    params: &SimParams,
) -> Result<DVector<f64>, SimError> {
    ensemble.check_against(params)?;
    if i >= ensemble.len() {
        return Err(SimError::DimensionMismatch {
            what: "particle index",
            expected: ensemble.len(),
            found: i,
        });
    }

    let m_i = ensemble.masses[i];
    let pos_i = &ensemble.positions[i];

    let mut total = DVector::zeros(params.dim);
    for j in 0..ensemble.len() {
        if i == j {
            continue;
        }
        let f = pairwise_force(
            m_i,
            ensemble.masses[j],
            pos_i,
            &ensemble.positions[j],
            params.g,
        )
        .map_err(|e| match e {
            SimError::DegenerateInput { .. } => SimError::DegenerateInput { i, j },
            other => other,
        })?;
        total += f;
    }

    Ok(total)
}

/// Net force on every particle, in ensemble order. Two of these calls
/// dominate the cost of a step (O(n²) pairwise evaluations each).
///
/// With the `parallel` feature the outer loop runs on rayon: each particle's
/// summation reads only masses/positions and writes its own output slot, so
/// the results are identical to the sequential path.
pub fn net_force_on_all(
    ensemble: &Ensemble,
    params: &SimParams,
) -> Result<Vec<DVector<f64>>, SimError> {
    ensemble.check_against(params)?;

    #[cfg(feature = "parallel")]
    {
        (0..ensemble.len())
            .into_par_iter()
            .map(|i| net_force_on(i, ensemble, params))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..ensemble.len())
            .map(|i| net_force_on(i, ensemble, params))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
