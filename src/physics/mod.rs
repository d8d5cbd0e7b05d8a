pub mod gravity;

pub use gravity::{net_force_on, net_force_on_all, pairwise_force};
