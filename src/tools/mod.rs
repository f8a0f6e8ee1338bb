//! The tools module provides the helpers around the codec proper.
//!
//! The tools are:
//! - cli: Command line interface for the canhuff binary.
//! - freq_count: Frequency count of the input symbols.
//! - report: Weighted path length and entropy of a finished code.
//!
pub mod cli;
pub mod freq_count;
pub mod report;
