/*!
Cipher operation interfaces.
*/

#[cfg(feature = "async")]
use async_trait::async_trait;

use crate::core::error::Result;

/// Authenticated encryption and decryption bound to one key and one
/// parameter set. Stateless across independent invocations.
#[cfg_attr(feature = "async", async_trait)]
pub trait Cipher: Send + Sync {
    fn encrypt_blocking(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    fn decrypt_blocking(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;

    #[cfg(feature = "async")]
    async fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    #[cfg(feature = "async")]
    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}
