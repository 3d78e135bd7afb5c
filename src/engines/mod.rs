//! Engine implementations bundled with the facade.
//!
//! An engine supplies, per algorithm and operation kind, a factory that
//! takes operation parameters and returns an operation instance. The core
//! never inspects engine internals; platform-specific engines plug in
//! through the same provider surface the software engine uses.

pub mod software;
