/*!
Authenticated encryption declarations and parameter shapes.
*/

use std::sync::Arc;

use crate::core::error::Result;
use crate::core::params::Parameters;
use crate::core::provider::AlgorithmId;
use crate::operations::cipher::Cipher;
use crate::operations::key::KeyGenerator;

pub const CHACHA20_POLY1305: AlgorithmId<dyn Aead> = AlgorithmId::new("ChaCha20-Poly1305");

/// Operation surface of an authenticated cipher algorithm.
pub trait Aead: Send + Sync {
    fn key_generator(
        &self,
        parameters: SymmetricKeyParameters,
    ) -> Result<Arc<dyn KeyGenerator<AeadKey>>>;
}

/// Key generation parameters for symmetric algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymmetricKeyParameters {
    pub size_bits: u32,
}

impl Default for SymmetricKeyParameters {
    fn default() -> Self {
        Self { size_bits: 256 }
    }
}

pub struct SymmetricKeyParametersBuilder {
    pub size_bits: u32,
}

impl From<SymmetricKeyParameters> for SymmetricKeyParametersBuilder {
    fn from(base: SymmetricKeyParameters) -> Self {
        Self {
            size_bits: base.size_bits,
        }
    }
}

impl Parameters for SymmetricKeyParameters {
    type Builder = SymmetricKeyParametersBuilder;

    fn from_builder(builder: Self::Builder) -> Self {
        Self {
            size_bits: builder.size_bits,
        }
    }
}

/// Cipher parameters for authenticated encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AeadParameters {
    pub tag_size_bits: u32,
}

impl Default for AeadParameters {
    fn default() -> Self {
        Self { tag_size_bits: 128 }
    }
}

pub struct AeadParametersBuilder {
    pub tag_size_bits: u32,
}

impl From<AeadParameters> for AeadParametersBuilder {
    fn from(base: AeadParameters) -> Self {
        Self {
            tag_size_bits: base.tag_size_bits,
        }
    }
}

impl Parameters for AeadParameters {
    type Builder = AeadParametersBuilder;

    fn from_builder(builder: Self::Builder) -> Self {
        Self {
            tag_size_bits: builder.tag_size_bits,
        }
    }
}

/// Factory the engine supplies for deriving ciphers from a key.
pub trait CipherFactory: Send + Sync {
    /// Fails with `UnsupportedParameterValue` before the engine is ever
    /// invoked in an undefined state.
    fn cipher(&self, parameters: &AeadParameters) -> Result<Arc<dyn Cipher>>;
}

/// A generated symmetric key. The key material stays inside the engine;
/// callers only derive cipher instances from it.
#[derive(Clone)]
pub struct AeadKey {
    factory: Arc<dyn CipherFactory>,
}

impl AeadKey {
    /// Called by engines when a key is generated or imported.
    pub fn new(factory: Arc<dyn CipherFactory>) -> Self {
        Self { factory }
    }

    pub fn cipher(&self, parameters: AeadParameters) -> Result<Arc<dyn Cipher>> {
        self.factory.cipher(&parameters)
    }

    pub fn cipher_default(&self) -> Result<Arc<dyn Cipher>> {
        self.cipher(AeadParameters::default())
    }
}
