/*!
HMAC algorithm declaration and parameter shapes.
*/

use std::sync::Arc;

use crate::algorithms::digest::{self, Digest};
use crate::core::error::Result;
use crate::core::params::Parameters;
use crate::core::provider::AlgorithmId;
use crate::operations::key::KeyGenerator;
use crate::operations::signature::{SignatureGenerator, SignatureVerifier};

pub const HMAC: AlgorithmId<dyn Hmac> = AlgorithmId::new("HMAC");

/// Operation surface of the HMAC algorithm.
pub trait Hmac: Send + Sync {
    /// Build a key generator for the given parameters. Fails with
    /// `UnsupportedParameterValue` if the engine cannot back the chosen
    /// digest.
    fn key_generator(&self, parameters: HmacParameters) -> Result<Arc<dyn KeyGenerator<HmacKey>>>;
}

/// Key generation parameters for HMAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HmacParameters {
    /// Digest the MAC is built over.
    pub digest: AlgorithmId<dyn Digest>,
}

impl Default for HmacParameters {
    fn default() -> Self {
        Self {
            digest: digest::SHA256,
        }
    }
}

pub struct HmacParametersBuilder {
    pub digest: AlgorithmId<dyn Digest>,
}

impl From<HmacParameters> for HmacParametersBuilder {
    fn from(base: HmacParameters) -> Self {
        Self {
            digest: base.digest,
        }
    }
}

impl Parameters for HmacParameters {
    type Builder = HmacParametersBuilder;

    fn from_builder(builder: Self::Builder) -> Self {
        Self {
            digest: builder.digest,
        }
    }
}

/// A generated HMAC key, bundling the signing and verifying surfaces the
/// engine produced for it.
#[derive(Clone)]
pub struct HmacKey {
    generator: Arc<dyn SignatureGenerator>,
    verifier: Arc<dyn SignatureVerifier>,
}

impl HmacKey {
    /// Called by engines when a key is generated or imported.
    pub fn new(generator: Arc<dyn SignatureGenerator>, verifier: Arc<dyn SignatureVerifier>) -> Self {
        Self { generator, verifier }
    }

    pub fn signature_generator(&self) -> Arc<dyn SignatureGenerator> {
        self.generator.clone()
    }

    pub fn signature_verifier(&self) -> Arc<dyn SignatureVerifier> {
        self.verifier.clone()
    }
}
