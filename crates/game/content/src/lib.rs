//! Data-driven content and loaders.
//!
//! This crate reads the data files that sit around the combat core:
//! - Combat configuration (data-driven via TOML)
//! - Scripted input timelines (data-driven via RON)
//!
//! Frame data is not loaded from here; the move table is fixed in fight-core.
//!
//! All loaders use fight-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, InputScript, ScriptLoader, ScriptSegment};
