use crate::model::error::SimError;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

/// Newtonian gravitational constant, m^3 kg^-1 s^-2 (CODATA 2018).
pub const G_SI: f64 = 6.674_30e-11;

// ---------------------------------------------------------------------------
// Simulation parameters
// ---------------------------------------------------------------------------

/// Run configuration, immutable during a step.
///
/// `finished` is the one exception: the driver loop consults it after every
/// completed step, and the termination-check collaborator sets it. The core
/// physics never writes it.
#[derive(Debug, Clone)]
pub struct SimParams {
    pub g: f64,            // gravitational constant, positive
    pub dt: f64,           // integration timestep, s, positive
    pub dim: usize,        // spatial dimensionality, >= 1
    pub n_particles: usize,
    pub finished: bool,
}

impl SimParams {
    /// Build parameters, rejecting non-positive `g`, `dt`, or `dim`.
    /// `finished` starts false.
    pub fn new(g: f64, dt: f64, dim: usize, n_particles: usize) -> Result<Self, SimError> {
        if g <= 0.0 {
            return Err(SimError::InvalidParameter { name: "G", value: g });
        }
        if dt <= 0.0 {
            return Err(SimError::InvalidParameter {
                name: "dt",
                value: dt,
            });
        }
        if dim == 0 {
            return Err(SimError::InvalidParameter {
                name: "dim",
                value: 0.0,
            });
        }
        Ok(Self {
            g,
            dt,
            dim,
            n_particles,
            finished: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_params_start_unfinished() {
        let p = SimParams::new(G_SI, 86_400.0, 3, 2).unwrap();
        assert!(!p.finished);
        assert_eq!(p.dim, 3);
    }

    #[test]
    fn rejects_nonpositive_g() {
        assert!(SimParams::new(0.0, 1.0, 2, 1).is_err());
        assert!(SimParams::new(-1.0, 1.0, 2, 1).is_err());
    }

    #[test]
    fn rejects_nonpositive_dt() {
        assert!(SimParams::new(G_SI, 0.0, 2, 1).is_err());
    }

    #[test]
    fn rejects_zero_dimensionality() {
        assert!(SimParams::new(G_SI, 1.0, 0, 1).is_err());
    }
}
