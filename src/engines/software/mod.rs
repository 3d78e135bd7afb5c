/*!
The bundled software engine.

Implements every declared algorithm in pure Rust on top of the RustCrypto
crates, so all platforms have at least one working provider. The engine is
immediate-native: blocking calls run in place and deferred calls go
through the engine's [`ExecutorBridge`].
*/

mod aead;
mod digest;
mod hmac;

use std::sync::Arc;

use tracing::debug;

use crate::algorithms;
use crate::core::adaptor::ExecutorBridge;
use crate::core::provider::{self, Provider};

pub const ENGINE_NAME: &str = "Software";

/// Build the software provider with its default adaptors: with the
/// `async` feature, deferred callers are bridged onto a blocking worker
/// pool.
pub fn provider() -> Arc<Provider> {
    provider_with_bridge(Arc::new(ExecutorBridge::with_defaults(ENGINE_NAME)))
}

/// Build the software provider with no adaptors configured. Blocking
/// calls still work natively; deferred calls fail with `AdaptorMissing`.
pub fn provider_without_adaptors() -> Arc<Provider> {
    provider_with_bridge(Arc::new(ExecutorBridge::new(ENGINE_NAME)))
}

fn provider_with_bridge(bridge: Arc<ExecutorBridge>) -> Arc<Provider> {
    debug!(engine = ENGINE_NAME, "assembling software provider");
    Provider::builder(ENGINE_NAME)
        .register(
            algorithms::digest::SHA256,
            digest::algorithm(digest::DigestKind::Sha256, bridge.clone()),
        )
        .register(
            algorithms::digest::SHA512,
            digest::algorithm(digest::DigestKind::Sha512, bridge.clone()),
        )
        .register(algorithms::hmac::HMAC, hmac::algorithm(bridge.clone()))
        .register(algorithms::aead::CHACHA20_POLY1305, aead::algorithm(bridge))
        .build()
}

/// Install the software provider into the process-wide registry.
/// Idempotent; later calls are no-ops.
pub fn install() {
    provider::register_provider(provider());
}
