//! Flight façade crate: great-circle routing, timing, sun-relative classification,
//! and twilight boundary generation.

pub mod flight;
pub mod twilight;

pub use facade::*;

mod facade;
