/*!
SHA-2 digests backed by the `sha2` crate.
*/

use std::sync::Arc;

#[cfg(feature = "async")]
use async_trait::async_trait;
use sha2::{Digest as _, Sha256, Sha512};

use super::ENGINE_NAME;
use crate::algorithms::digest::{self, Digest};
use crate::core::adaptor::ExecutorBridge;
use crate::core::error::{self, Result};
use crate::core::provider::AlgorithmId;
use crate::core::update::{self, UpdateFunction};
use crate::operations::hash::{HashFunction, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DigestKind {
    Sha256,
    Sha512,
}

impl DigestKind {
    fn id(self) -> AlgorithmId<dyn Digest> {
        match self {
            DigestKind::Sha256 => digest::SHA256,
            DigestKind::Sha512 => digest::SHA512,
        }
    }

    pub(super) fn size(self) -> usize {
        match self {
            DigestKind::Sha256 => 32,
            DigestKind::Sha512 => 64,
        }
    }
}

pub(super) fn algorithm(kind: DigestKind, bridge: Arc<ExecutorBridge>) -> Arc<dyn Digest> {
    Arc::new(SoftwareDigest { kind, bridge })
}

struct SoftwareDigest {
    kind: DigestKind,
    bridge: Arc<ExecutorBridge>,
}

impl Digest for SoftwareDigest {
    fn id(&self) -> AlgorithmId<dyn Digest> {
        self.kind.id()
    }

    fn hasher(&self) -> Result<Arc<dyn Hasher>> {
        Ok(Arc::new(SoftwareHasher {
            kind: self.kind,
            bridge: self.bridge.clone(),
        }))
    }
}

struct SoftwareHasher {
    kind: DigestKind,
    bridge: Arc<ExecutorBridge>,
}

#[cfg_attr(feature = "async", async_trait)]
impl Hasher for SoftwareHasher {
    fn digest_size(&self) -> usize {
        self.kind.size()
    }

    fn hash_blocking(&self, data: &[u8]) -> Result<Vec<u8>> {
        hash_once(self.kind, data)
    }

    fn hash_function(&self) -> Result<Box<dyn HashFunction>> {
        Ok(Box::new(SoftwareHashFunction::new(self.kind)))
    }

    #[cfg(feature = "async")]
    async fn hash(&self, data: &[u8]) -> Result<Vec<u8>> {
        let kind = self.kind;
        let data = data.to_vec();
        self.bridge.run_deferred(move || hash_once(kind, &data)).await
    }
}

fn hash_once(kind: DigestKind, data: &[u8]) -> Result<Vec<u8>> {
    let mut function = SoftwareHashFunction::new(kind);
    function.update_all(data)?;
    HashFunction::finish(Box::new(function))
}

enum Accumulator {
    Sha256(Sha256),
    Sha512(Sha512),
}

impl Accumulator {
    fn new(kind: DigestKind) -> Self {
        match kind {
            DigestKind::Sha256 => Accumulator::Sha256(Sha256::new()),
            DigestKind::Sha512 => Accumulator::Sha512(Sha512::new()),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Accumulator::Sha256(state) => state.update(data),
            Accumulator::Sha512(state) => state.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            Accumulator::Sha256(state) => state.finalize().to_vec(),
            Accumulator::Sha512(state) => state.finalize().to_vec(),
        }
    }
}

struct SoftwareHashFunction {
    state: Accumulator,
    failed: bool,
}

impl SoftwareHashFunction {
    fn new(kind: DigestKind) -> Self {
        Self {
            state: Accumulator::new(kind),
            failed: false,
        }
    }
}

impl UpdateFunction for SoftwareHashFunction {
    fn update(&mut self, source: &[u8], start: usize, end: usize) -> Result<()> {
        if self.failed {
            return error::native_err("hash update", ENGINE_NAME, "accumulator already failed");
        }
        if let Err(err) = update::check_range(source.len(), start, end) {
            self.failed = true;
            return Err(err);
        }
        self.state.update(&source[start..end]);
        Ok(())
    }
}

impl HashFunction for SoftwareHashFunction {
    fn finish(self: Box<Self>) -> Result<Vec<u8>> {
        if self.failed {
            return error::native_err("hash finalization", ENGINE_NAME, "accumulator failed before finalization");
        }
        Ok(self.state.finalize())
    }
}
