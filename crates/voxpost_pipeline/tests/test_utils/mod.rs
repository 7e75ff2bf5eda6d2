//! Shared helpers for pipeline integration tests.

#![allow(dead_code)]

mod fixtures;
mod mock_driver;

pub use fixtures::*;
pub use mock_driver::*;
