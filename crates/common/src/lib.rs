//! Shared building blocks for the HourStack crates.

pub mod types;
pub mod utils;
