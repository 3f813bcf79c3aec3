//! Shared utilities

pub mod codes;
pub mod time;
