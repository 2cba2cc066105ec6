//! Command implementations

pub mod backends;
pub mod del;
pub mod diagnose;
pub mod get;
pub mod set;
