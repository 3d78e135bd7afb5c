/*!
# Crypto Facade

A cross-platform cryptographic operation abstraction layer.

Callers resolve algorithms through named providers and drive them through
one uniform API, while the actual primitive runs on whichever engine is
installed for the platform. The library is built from four pieces:

- Typed algorithm identifiers and a process-wide provider registry,
  populated once at startup and immutable afterwards
- Immutable operation parameters with copy-on-write builders
- Execution-style adaptors that bridge one canonical operation
  implementation to both blocking and async call sites (enable the
  `async` feature)
- An incremental update pipeline that turns any byte source or sink into
  a transparent relay feeding a running digest/MAC accumulator, without a
  second copy of the payload

A pure-Rust software engine is bundled so every platform has at least one
working provider.

## Example

```
use crypto_facade::algorithms::digest::SHA256;
use crypto_facade::engines::software;
use crypto_facade::provider;

fn main() -> crypto_facade::Result<()> {
    software::install();

    let provider = provider::default_provider()?;
    let hasher = provider.get(SHA256)?.hasher()?;
    let digest = hasher.hash_blocking(b"Hello, World!")?;
    assert_eq!(digest.len(), 32);
    Ok(())
}
```
*/

// Core building blocks
pub mod core;

// Algorithm declarations
pub mod algorithms;

// Bundled engines
pub mod engines;

// Operation interfaces
pub mod operations;

// Re-export the provider module under a short path
pub use crate::core::provider;

// Re-export commonly used types for convenience
pub use crate::core::adaptor::ExecutionStyle;
#[cfg(feature = "async")]
pub use crate::core::adaptor::{BlockingAdaptor, SuspendAdaptor};
pub use crate::core::adaptor::ExecutorBridge;
pub use crate::core::buffer::{
    ByteSink, ByteSource, DiscardingSink, ReaderSource, SegmentBuffer, WriterSink,
};
pub use crate::core::error::{Error, Result};
pub use crate::core::params::{configure, Parameters};
pub use crate::core::provider::{AlgorithmId, Provider, ProviderBuilder};
pub use crate::core::update::{
    drain_source, updating_sink, updating_source, UpdateFunction, UpdatingSink, UpdatingSource,
};
