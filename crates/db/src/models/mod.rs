mod appointment_type;
mod client;
mod scheduling;
mod scheduling_config;
mod tenant;
mod weekly_availability;
mod worker;

pub use appointment_type::*;
pub use client::*;
pub use scheduling::*;
pub use scheduling_config::*;
pub use tenant::*;
pub use weekly_availability::*;
pub use worker::*;
