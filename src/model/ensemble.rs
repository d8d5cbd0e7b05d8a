use nalgebra::DVector;

use crate::model::error::SimError;
use crate::model::params::SimParams;

// ---------------------------------------------------------------------------
// Particle ensemble: masses, positions, velocities as parallel sequences
// ---------------------------------------------------------------------------

/// All bodies in the simulation as three index-aligned sequences.
///
/// A particle's identity is its index; indices are stable for the lifetime
/// of a run (no insertion or removal). Positions and velocities are mutated
/// in place each step; masses never change.
#[derive(Debug, Clone)]
pub struct Ensemble {
    pub masses: Vec<f64>,          // kg (or chosen mass unit), all positive
    pub positions: Vec<DVector<f64>>,  // m, one d-vector per particle
    pub velocities: Vec<DVector<f64>>, // m/s
}

impl Ensemble {
    /// Build an ensemble, validating the parallel-sequence invariants:
    /// equal particle counts, a single shared dimensionality, and strictly
    /// positive masses.
    pub fn new(
        masses: Vec<f64>,
        positions: Vec<DVector<f64>>,
        velocities: Vec<DVector<f64>>,
    ) -> Result<Self, SimError> {
        let n = masses.len();
        if positions.len() != n {
            return Err(SimError::DimensionMismatch {
                what: "positions",
                expected: n,
                found: positions.len(),
            });
        }
        if velocities.len() != n {
            return Err(SimError::DimensionMismatch {
                what: "velocities",
                expected: n,
                found: velocities.len(),
            });
        }

        let dim = positions.first().map_or(0, |p| p.len());
        for p in &positions {
            if p.len() != dim {
                return Err(SimError::DimensionMismatch {
                    what: "position vector",
                    expected: dim,
                    found: p.len(),
                });
            }
        }
        for v in &velocities {
            if v.len() != dim {
                return Err(SimError::DimensionMismatch {
                    what: "velocity vector",
                    expected: dim,
                    found: v.len(),
                });
            }
        }

        for &m in &masses {
            if m <= 0.0 {
                return Err(SimError::InvalidParameter {
                    name: "mass",
                    value: m,
                });
            }
        }

        Ok(Self {
            masses,
            positions,
            velocities,
        })
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Spatial dimensionality (0 for an empty ensemble).
    pub fn dim(&self) -> usize {
        self.positions.first().map_or(0, |p| p.len())
    }

    /// Boundary check against the run parameters. The fields are public, so
    /// every core operation re-validates before touching the arrays.
    pub fn check_against(&self, params: &SimParams) -> Result<(), SimError> {
        if self.len() != params.n_particles {
            return Err(SimError::DimensionMismatch {
                what: "particle count",
                expected: params.n_particles,
                found: self.len(),
            });
        }
        if self.positions.len() != self.len() || self.velocities.len() != self.len() {
            return Err(SimError::DimensionMismatch {
                what: "parallel sequences",
                expected: self.len(),
                found: self.positions.len().min(self.velocities.len()),
            });
        }
        for p in &self.positions {
            if p.len() != params.dim {
                return Err(SimError::DimensionMismatch {
                    what: "position vector",
                    expected: params.dim,
                    found: p.len(),
                });
            }
        }
        for v in &self.velocities {
            if v.len() != params.dim {
                return Err(SimError::DimensionMismatch {
                    what: "velocity vector",
                    expected: params.dim,
                    found: v.len(),
                });
            }
        }
        Ok(())
    }
}
