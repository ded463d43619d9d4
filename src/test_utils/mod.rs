//! Test utilities for the weather station
//!
//! Scripted weather sources and payload factories shared by the unit tests.

pub mod factories;
pub mod mocks;

pub use factories::*;
pub use mocks::*;
