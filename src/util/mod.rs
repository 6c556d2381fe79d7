//! Utility functions and helpers

pub mod seed;
pub mod time;
