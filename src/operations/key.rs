/*!
Key generation interfaces.
*/

#[cfg(feature = "async")]
use async_trait::async_trait;

use crate::core::error::Result;

/// Generates keys of type `K` from the parameters the factory was built
/// with.
#[cfg_attr(feature = "async", async_trait)]
pub trait KeyGenerator<K: Send + 'static>: Send + Sync {
    fn generate_blocking(&self) -> Result<K>;

    #[cfg(feature = "async")]
    async fn generate(&self) -> Result<K>;
}
