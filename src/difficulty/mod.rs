//! Named difficulty tiers.
//!
//! A tier name resolves to an [`EngineSpec`]: which search algorithm to
//! run and with what budget. The registry is the only place tiers are
//! mapped to configurations.

pub mod registry;

pub use registry::{DifficultyRegistry, EngineSpec, STANDARD_TIERS};
