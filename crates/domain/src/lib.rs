pub mod availability;
pub mod wire;

pub use availability::*;
