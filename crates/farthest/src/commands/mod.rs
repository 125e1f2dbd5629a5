//! Command implementations.

pub mod distance;
pub mod info;
pub mod rank;
