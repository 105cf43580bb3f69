//! Common test utilities for media-fetch integration tests

#[allow(dead_code)]
pub mod engine;
#[allow(dead_code)]
pub mod fixtures;

#[allow(unused_imports)]
pub use engine::*;
#[allow(unused_imports)]
pub use fixtures::*;
