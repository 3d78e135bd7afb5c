/*!
HMAC over the SHA-2 digests, backed by the `hmac` crate.

A generated key keeps its material inside the engine, wrapped in
`Zeroizing` so it is wiped when the last handle drops.
*/

use std::sync::Arc;

#[cfg(feature = "async")]
use async_trait::async_trait;
use hmac::{Hmac as HmacImpl, Mac};
use rand::RngCore;
use sha2::{Sha256, Sha512};
use zeroize::Zeroizing;

use super::digest::DigestKind;
use super::ENGINE_NAME;
use crate::algorithms::digest;
use crate::algorithms::hmac::{Hmac, HmacKey, HmacParameters};
use crate::core::adaptor::ExecutorBridge;
use crate::core::error::{self, Error, Result};
use crate::core::update::{self, UpdateFunction};
use crate::operations::key::KeyGenerator;
use crate::operations::signature::{
    SignFunction, SignatureGenerator, SignatureVerifier, VerifyFunction,
};

pub(super) fn algorithm(bridge: Arc<ExecutorBridge>) -> Arc<dyn Hmac> {
    Arc::new(SoftwareHmac { bridge })
}

struct SoftwareHmac {
    bridge: Arc<ExecutorBridge>,
}

impl Hmac for SoftwareHmac {
    fn key_generator(&self, parameters: HmacParameters) -> Result<Arc<dyn KeyGenerator<HmacKey>>> {
        let kind = digest_kind(&parameters)?;
        Ok(Arc::new(SoftwareHmacKeyGenerator {
            kind,
            bridge: self.bridge.clone(),
        }))
    }
}

fn digest_kind(parameters: &HmacParameters) -> Result<DigestKind> {
    if parameters.digest == digest::SHA256 {
        Ok(DigestKind::Sha256)
    } else if parameters.digest == digest::SHA512 {
        Ok(DigestKind::Sha512)
    } else {
        Err(Error::UnsupportedParameterValue {
            operation: "HMAC key generation",
            engine: ENGINE_NAME,
            reason: format!("unsupported digest {}", parameters.digest),
        })
    }
}

#[derive(Clone)]
struct SoftwareHmacKeyGenerator {
    kind: DigestKind,
    bridge: Arc<ExecutorBridge>,
}

impl SoftwareHmacKeyGenerator {
    fn generate_key(&self) -> Result<HmacKey> {
        let mut material = Zeroizing::new(vec![0u8; self.kind.size()]);
        rand::rng().fill_bytes(&mut material);
        let signer = Arc::new(SoftwareHmacSignature {
            kind: self.kind,
            material,
            bridge: self.bridge.clone(),
        });
        Ok(HmacKey::new(signer.clone(), signer))
    }
}

#[cfg_attr(feature = "async", async_trait)]
impl KeyGenerator<HmacKey> for SoftwareHmacKeyGenerator {
    fn generate_blocking(&self) -> Result<HmacKey> {
        self.generate_key()
    }

    #[cfg(feature = "async")]
    async fn generate(&self) -> Result<HmacKey> {
        let generator = self.clone();
        self.bridge.run_deferred(move || generator.generate_key()).await
    }
}

enum MacState {
    Sha256(HmacImpl<Sha256>),
    Sha512(HmacImpl<Sha512>),
}

impl MacState {
    fn new(kind: DigestKind, material: &[u8]) -> Result<Self> {
        let state = match kind {
            DigestKind::Sha256 => HmacImpl::<Sha256>::new_from_slice(material).map(MacState::Sha256),
            DigestKind::Sha512 => HmacImpl::<Sha512>::new_from_slice(material).map(MacState::Sha512),
        };
        state.map_err(|err| Error::NativeOperationFailure {
            operation: "MAC initialization",
            engine: ENGINE_NAME,
            cause: err.to_string(),
        })
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            MacState::Sha256(state) => state.update(data),
            MacState::Sha512(state) => state.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            MacState::Sha256(state) => state.finalize().into_bytes().to_vec(),
            MacState::Sha512(state) => state.finalize().into_bytes().to_vec(),
        }
    }

    fn verify(self, signature: &[u8]) -> bool {
        match self {
            MacState::Sha256(state) => state.verify_slice(signature).is_ok(),
            MacState::Sha512(state) => state.verify_slice(signature).is_ok(),
        }
    }
}

struct SoftwareHmacSignature {
    kind: DigestKind,
    material: Zeroizing<Vec<u8>>,
    bridge: Arc<ExecutorBridge>,
}

impl SoftwareHmacSignature {
    fn state(&self) -> Result<MacState> {
        MacState::new(self.kind, &self.material)
    }

    fn sign_once(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut state = self.state()?;
        state.update(data);
        Ok(state.finalize())
    }

    fn verify_once(&self, data: &[u8], signature: &[u8]) -> Result<bool> {
        let mut state = self.state()?;
        state.update(data);
        Ok(state.verify(signature))
    }
}

#[cfg_attr(feature = "async", async_trait)]
impl SignatureGenerator for SoftwareHmacSignature {
    fn signature_size(&self) -> usize {
        self.kind.size()
    }

    fn sign_blocking(&self, data: &[u8]) -> Result<Vec<u8>> {
        self.sign_once(data)
    }

    fn sign_function(&self) -> Result<Box<dyn SignFunction>> {
        Ok(Box::new(SoftwareMacFunction::new(self.state()?)))
    }

    #[cfg(feature = "async")]
    async fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let state = self.state()?;
        let data = data.to_vec();
        self.bridge
            .run_deferred(move || {
                let mut state = state;
                state.update(&data);
                Ok(state.finalize())
            })
            .await
    }
}

#[cfg_attr(feature = "async", async_trait)]
impl SignatureVerifier for SoftwareHmacSignature {
    fn verify_blocking(&self, data: &[u8], signature: &[u8]) -> Result<bool> {
        self.verify_once(data, signature)
    }

    fn verify_function(&self) -> Result<Box<dyn VerifyFunction>> {
        Ok(Box::new(SoftwareMacFunction::new(self.state()?)))
    }

    #[cfg(feature = "async")]
    async fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool> {
        let state = self.state()?;
        let data = data.to_vec();
        let signature = signature.to_vec();
        self.bridge
            .run_deferred(move || {
                let mut state = state;
                state.update(&data);
                Ok(state.verify(&signature))
            })
            .await
    }
}

struct SoftwareMacFunction {
    state: MacState,
    failed: bool,
}

impl SoftwareMacFunction {
    fn new(state: MacState) -> Self {
        Self {
            state,
            failed: false,
        }
    }
}

impl UpdateFunction for SoftwareMacFunction {
    fn update(&mut self, source: &[u8], start: usize, end: usize) -> Result<()> {
        if self.failed {
            return error::native_err("MAC update", ENGINE_NAME, "accumulator already failed");
        }
        if let Err(err) = update::check_range(source.len(), start, end) {
            self.failed = true;
            return Err(err);
        }
        self.state.update(&source[start..end]);
        Ok(())
    }
}

impl SignFunction for SoftwareMacFunction {
    fn finish(self: Box<Self>) -> Result<Vec<u8>> {
        if self.failed {
            return error::native_err("MAC finalization", ENGINE_NAME, "accumulator failed before finalization");
        }
        Ok(self.state.finalize())
    }
}

impl VerifyFunction for SoftwareMacFunction {
    fn finish(self: Box<Self>, signature: &[u8]) -> Result<bool> {
        if self.failed {
            return error::native_err("MAC verification", ENGINE_NAME, "accumulator failed before finalization");
        }
        Ok(self.state.verify(signature))
    }
}
