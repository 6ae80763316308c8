//! Text normalization primitives.
//!
//! - [`patterns`]: compiled, read-only regex tables
//! - [`cleanup`]: whitespace, image-hint and case helpers

pub mod cleanup;
pub mod patterns;
