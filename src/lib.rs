pub mod io;
pub mod model;
pub mod physics;
pub mod sim;

pub use model::{Ensemble, SimError, SimParams, G_SI};
pub use physics::gravity::{net_force_on, net_force_on_all, pairwise_force};
pub use sim::{run_loop, simulate, step};
