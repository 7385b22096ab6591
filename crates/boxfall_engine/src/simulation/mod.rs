//! Fixed-tick simulation driver

pub mod driver;

pub use driver::{DriverState, SimulationDriver};

#[cfg(test)]
mod tests;
