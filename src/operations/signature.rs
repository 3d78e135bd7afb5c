/*!
Signature generation and verification interfaces.
*/

#[cfg(feature = "async")]
use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::update::UpdateFunction;

/// An incremental signing accumulator, finalized exactly once.
pub trait SignFunction: UpdateFunction + Send {
    fn finish(self: Box<Self>) -> Result<Vec<u8>>;
}

/// An incremental verification accumulator, finalized exactly once
/// against a candidate signature.
pub trait VerifyFunction: UpdateFunction + Send {
    fn finish(self: Box<Self>, signature: &[u8]) -> Result<bool>;
}

#[cfg_attr(feature = "async", async_trait)]
pub trait SignatureGenerator: Send + Sync {
    /// Signature size in bytes.
    fn signature_size(&self) -> usize;

    fn sign_blocking(&self, data: &[u8]) -> Result<Vec<u8>>;

    fn sign_function(&self) -> Result<Box<dyn SignFunction>>;

    #[cfg(feature = "async")]
    async fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;
}

#[cfg_attr(feature = "async", async_trait)]
pub trait SignatureVerifier: Send + Sync {
    /// Returns whether `signature` is valid for `data`. A mismatch is a
    /// `false` result, not an error.
    fn verify_blocking(&self, data: &[u8], signature: &[u8]) -> Result<bool>;

    fn verify_function(&self) -> Result<Box<dyn VerifyFunction>>;

    #[cfg(feature = "async")]
    async fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool>;
}
