//! Core building blocks of the facade: errors, immutable parameters,
//! provider resolution, execution-style adaptors and the streaming update
//! pipeline.

// Execution-style bridging
pub mod adaptor;

// Segmented buffers and source/sink abstractions
pub mod buffer;

// Error handling
pub mod error;

// Immutable parameters with copy-on-write builders
pub mod params;

// Typed identifiers and provider resolution
pub mod provider;

// The incremental update pipeline
pub mod update;

// Re-exports for convenience
pub use self::error::{Error, Result};
