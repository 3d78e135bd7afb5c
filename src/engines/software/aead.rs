/*!
ChaCha20-Poly1305 backed by the `chacha20poly1305` crate.

Ciphertexts are framed as `nonce || body || tag` with a fresh random
96-bit nonce per encryption.
*/

use std::sync::Arc;

#[cfg(feature = "async")]
use async_trait::async_trait;
use chacha20poly1305::aead::Aead as _;
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce};
use rand::RngCore;
use zeroize::Zeroizing;

use super::ENGINE_NAME;
use crate::algorithms::aead::{Aead, AeadKey, AeadParameters, CipherFactory, SymmetricKeyParameters};
use crate::core::adaptor::ExecutorBridge;
use crate::core::error::{self, Error, Result};
use crate::operations::cipher::Cipher;
use crate::operations::key::KeyGenerator;

const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;

pub(super) fn algorithm(bridge: Arc<ExecutorBridge>) -> Arc<dyn Aead> {
    Arc::new(SoftwareAead { bridge })
}

struct SoftwareAead {
    bridge: Arc<ExecutorBridge>,
}

impl Aead for SoftwareAead {
    fn key_generator(
        &self,
        parameters: SymmetricKeyParameters,
    ) -> Result<Arc<dyn KeyGenerator<AeadKey>>> {
        if parameters.size_bits != 256 {
            return Err(Error::UnsupportedParameterValue {
                operation: "AEAD key generation",
                engine: ENGINE_NAME,
                reason: format!("unsupported key size of {} bits", parameters.size_bits),
            });
        }
        Ok(Arc::new(SoftwareAeadKeyGenerator {
            bridge: self.bridge.clone(),
        }))
    }
}

#[derive(Clone)]
struct SoftwareAeadKeyGenerator {
    bridge: Arc<ExecutorBridge>,
}

impl SoftwareAeadKeyGenerator {
    fn generate_key(&self) -> Result<AeadKey> {
        let mut material = Zeroizing::new(vec![0u8; 32]);
        rand::rng().fill_bytes(&mut material);
        Ok(AeadKey::new(Arc::new(SoftwareCipherFactory {
            material,
            bridge: self.bridge.clone(),
        })))
    }
}

#[cfg_attr(feature = "async", async_trait)]
impl KeyGenerator<AeadKey> for SoftwareAeadKeyGenerator {
    fn generate_blocking(&self) -> Result<AeadKey> {
        self.generate_key()
    }

    #[cfg(feature = "async")]
    async fn generate(&self) -> Result<AeadKey> {
        let generator = self.clone();
        self.bridge.run_deferred(move || generator.generate_key()).await
    }
}

struct SoftwareCipherFactory {
    material: Zeroizing<Vec<u8>>,
    bridge: Arc<ExecutorBridge>,
}

impl CipherFactory for SoftwareCipherFactory {
    fn cipher(&self, parameters: &AeadParameters) -> Result<Arc<dyn Cipher>> {
        if parameters.tag_size_bits as usize != TAG_SIZE * 8 {
            return Err(Error::UnsupportedParameterValue {
                operation: "AEAD cipher",
                engine: ENGINE_NAME,
                reason: format!("unsupported tag size of {} bits", parameters.tag_size_bits),
            });
        }
        Ok(Arc::new(SoftwareAeadCipher {
            material: self.material.clone(),
            bridge: self.bridge.clone(),
        }))
    }
}

#[derive(Clone)]
struct SoftwareAeadCipher {
    material: Zeroizing<Vec<u8>>,
    bridge: Arc<ExecutorBridge>,
}

impl SoftwareAeadCipher {
    fn cipher(&self) -> ChaCha20Poly1305 {
        ChaCha20Poly1305::new(Key::from_slice(&self.material))
    }

    fn encrypt_once(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let mut nonce = [0u8; NONCE_SIZE];
        rand::rng().fill_bytes(&mut nonce);
        let body = self
            .cipher()
            .encrypt(Nonce::from_slice(&nonce), plaintext)
            .map_err(|_| Error::NativeOperationFailure {
                operation: "AEAD encryption",
                engine: ENGINE_NAME,
                cause: "cipher rejected the plaintext".into(),
            })?;
        let mut out = Vec::with_capacity(NONCE_SIZE + body.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&body);
        Ok(out)
    }

    fn decrypt_once(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() < NONCE_SIZE + TAG_SIZE {
            return error::native_err(
                "AEAD decryption",
                ENGINE_NAME,
                format!("ciphertext of {} bytes is too short", ciphertext.len()),
            );
        }
        let (nonce, body) = ciphertext.split_at(NONCE_SIZE);
        self.cipher()
            .decrypt(Nonce::from_slice(nonce), body)
            .map_err(|_| Error::NativeOperationFailure {
                operation: "AEAD decryption",
                engine: ENGINE_NAME,
                cause: "authentication tag mismatch".into(),
            })
    }
}

#[cfg_attr(feature = "async", async_trait)]
impl Cipher for SoftwareAeadCipher {
    fn encrypt_blocking(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.encrypt_once(plaintext)
    }

    fn decrypt_blocking(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.decrypt_once(ciphertext)
    }

    #[cfg(feature = "async")]
    async fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = self.clone();
        let plaintext = plaintext.to_vec();
        self.bridge
            .run_deferred(move || cipher.encrypt_once(&plaintext))
            .await
    }

    #[cfg(feature = "async")]
    async fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cipher = self.clone();
        let ciphertext = ciphertext.to_vec();
        self.bridge
            .run_deferred(move || cipher.decrypt_once(&ciphertext))
            .await
    }
}
