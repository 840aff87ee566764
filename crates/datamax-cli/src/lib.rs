//! Library components of the DataMAx pipeline binary.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
