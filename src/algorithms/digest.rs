/*!
Digest algorithm declarations.
*/

use std::sync::Arc;

use crate::core::error::Result;
use crate::core::provider::AlgorithmId;
use crate::operations::hash::Hasher;

pub const SHA256: AlgorithmId<dyn Digest> = AlgorithmId::new("SHA-256");
pub const SHA512: AlgorithmId<dyn Digest> = AlgorithmId::new("SHA-512");

/// Operation surface shared by all digest algorithms. Digests take no
/// parameters, so the hasher factory has nothing to validate.
pub trait Digest: Send + Sync {
    /// The identifier this implementation was registered under.
    fn id(&self) -> AlgorithmId<dyn Digest>;

    fn hasher(&self) -> Result<Arc<dyn Hasher>>;
}
