//! Shared primitive types used across the entire pipeline.

/// A calendar year as stored in the source tables.
pub type Year = i64;

/// A quarter within a year, 1 through 4.
pub type Quarter = i64;
