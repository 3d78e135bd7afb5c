/*!
Hashing operation interfaces.
*/

#[cfg(feature = "async")]
use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::update::UpdateFunction;

/// An incremental hash accumulator.
///
/// Finalization consumes the function, so a result can be read out at
/// most once; dropping an unfinished function discards the accumulator,
/// which is also how a cancelled stream is cleaned up.
pub trait HashFunction: UpdateFunction + Send {
    fn finish(self: Box<Self>) -> Result<Vec<u8>>;
}

/// One-shot and streaming hashing for one algorithm on one engine.
#[cfg_attr(feature = "async", async_trait)]
pub trait Hasher: Send + Sync {
    /// Digest size in bytes.
    fn digest_size(&self) -> usize;

    fn hash_blocking(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Begin an incremental hash over a fresh accumulator.
    fn hash_function(&self) -> Result<Box<dyn HashFunction>>;

    #[cfg(feature = "async")]
    async fn hash(&self, data: &[u8]) -> Result<Vec<u8>>;
}
