pub mod ensemble;
pub mod error;
pub mod params;

pub use ensemble::Ensemble;
pub use error::SimError;
pub use params::{SimParams, G_SI};
