//! Utility modules shared across the build pipeline.

pub mod hash;
