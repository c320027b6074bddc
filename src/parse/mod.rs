//! Deterministic rule-based parsing (the local path)

pub mod dates;
pub mod names;
pub mod priority;
pub mod single;

pub use single::SingleTaskParser;
