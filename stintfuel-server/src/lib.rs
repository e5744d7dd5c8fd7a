//! StintFuel Server Library
//!
//! Exposes server components for integration testing.

pub mod api;
pub mod monitor;
pub mod state;
