//! Operation interfaces produced by resolved algorithms.
//!
//! Every interface exposes its blocking form unconditionally; with the
//! `async` feature the deferred form appears alongside it, bridged through
//! the engine's adaptors rather than reimplemented.

pub mod cipher;
pub mod hash;
pub mod key;
pub mod signature;

pub use cipher::Cipher;
pub use hash::{HashFunction, Hasher};
pub use key::KeyGenerator;
pub use signature::{SignFunction, SignatureGenerator, SignatureVerifier, VerifyFunction};
