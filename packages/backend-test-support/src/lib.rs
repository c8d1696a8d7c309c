//! Shared helpers for the Sequence backend test suites: one-time test
//! logging and Problem Details assertions.

pub mod logging;
pub mod problem_details;
