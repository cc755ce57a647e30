// src/oracle/mod.rs

//! Staleness oracle.
//!
//! Decides, from filesystem modification times alone, whether a task's
//! outputs are up to date with respect to its inputs.
//!
//! - [`evaluate`] contains the comparison algorithm.
//! - [`verdict`] defines [`StalenessVerdict`] and [`StaleReason`].

pub mod evaluate;
pub mod verdict;

pub use evaluate::{evaluate, evaluate_task};
pub use verdict::{StaleReason, StalenessVerdict};
