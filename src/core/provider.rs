/*!
Typed algorithm identifiers and provider resolution.

A provider maps [`AlgorithmId`]s to algorithm implementations supplied by
an engine. Identifiers carry the operation-interface type they resolve to,
so [`Provider::get`] hands back a correctly typed surface without a cast
at the call site. Providers are assembled once at startup and immutable
afterwards; a composite provider resolves through its delegates in a
fixed priority order.
*/

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::core::error::{Error, Result};

/// Typed identifier for a cryptographic algorithm family.
///
/// Identifiers are value-equal singletons: uniqueness by name is an
/// invariant within a running process.
pub struct AlgorithmId<A: ?Sized + 'static> {
    name: &'static str,
    _interface: PhantomData<fn() -> Arc<A>>,
}

impl<A: ?Sized> AlgorithmId<A> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _interface: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<A: ?Sized> Clone for AlgorithmId<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ?Sized> Copy for AlgorithmId<A> {}

impl<A: ?Sized> PartialEq for AlgorithmId<A> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<A: ?Sized> Eq for AlgorithmId<A> {}

impl<A: ?Sized> fmt::Debug for AlgorithmId<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlgorithmId({})", self.name)
    }
}

impl<A: ?Sized> fmt::Display for AlgorithmId<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

type Entry = Box<dyn Any + Send + Sync>;

/// A named source of algorithm implementations.
pub struct Provider {
    name: String,
    entries: HashMap<&'static str, Entry>,
    delegates: Vec<Arc<Provider>>,
}

impl Provider {
    pub fn builder(name: impl Into<String>) -> ProviderBuilder {
        ProviderBuilder {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// A provider that resolves through `delegates` in priority order and
    /// returns the first match. All-miss fails the same way a single
    /// provider would.
    pub fn composite(name: impl Into<String>, delegates: Vec<Arc<Provider>>) -> Arc<Provider> {
        Arc::new(Self {
            name: name.into(),
            entries: HashMap::new(),
            delegates,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supports<A>(&self, id: AlgorithmId<A>) -> bool
    where
        A: ?Sized + Send + Sync + 'static,
    {
        self.lookup(id).is_some()
    }

    /// Resolve `id` to its typed algorithm surface.
    pub fn get<A>(&self, id: AlgorithmId<A>) -> Result<Arc<A>>
    where
        A: ?Sized + Send + Sync + 'static,
    {
        self.lookup(id).ok_or_else(|| {
            debug!(provider = %self.name, algorithm = id.name(), "algorithm not supported");
            Error::UnsupportedAlgorithm {
                algorithm: id.name(),
                provider: self.name.clone(),
            }
        })
    }

    fn lookup<A>(&self, id: AlgorithmId<A>) -> Option<Arc<A>>
    where
        A: ?Sized + Send + Sync + 'static,
    {
        if let Some(entry) = self.entries.get(id.name()) {
            if let Some(algorithm) = entry.downcast_ref::<Arc<A>>() {
                return Some(algorithm.clone());
            }
        }
        self.delegates.iter().find_map(|delegate| delegate.lookup(id))
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("algorithms", &self.entries.keys().collect::<Vec<_>>())
            .field("delegates", &self.delegates)
            .finish()
    }
}

/// Startup-only staging for a [`Provider`]; consumed by [`build`].
///
/// [`build`]: ProviderBuilder::build
pub struct ProviderBuilder {
    name: String,
    entries: HashMap<&'static str, Entry>,
}

impl ProviderBuilder {
    /// Register an implementation for `id`. A later registration for the
    /// same name replaces the earlier one.
    pub fn register<A>(mut self, id: AlgorithmId<A>, algorithm: Arc<A>) -> Self
    where
        A: ?Sized + Send + Sync + 'static,
    {
        debug!(provider = %self.name, algorithm = id.name(), "registering algorithm");
        self.entries.insert(id.name(), Box::new(algorithm));
        self
    }

    pub fn build(self) -> Arc<Provider> {
        Arc::new(Provider {
            name: self.name,
            entries: self.entries,
            delegates: Vec::new(),
        })
    }
}

static PROVIDERS: Lazy<RwLock<Vec<Arc<Provider>>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// Install a provider for the lifetime of the process. The first provider
/// installed becomes the default; installing a second provider with the
/// same name is a no-op.
pub fn register_provider(provider: Arc<Provider>) {
    let mut providers = PROVIDERS.write().unwrap();
    if providers.iter().any(|p| p.name() == provider.name()) {
        return;
    }
    debug!(provider = provider.name(), "installing provider");
    providers.push(provider);
}

/// The first installed provider.
pub fn default_provider() -> Result<Arc<Provider>> {
    PROVIDERS
        .read()
        .unwrap()
        .first()
        .cloned()
        .ok_or_else(|| Error::Internal("no cryptography provider installed".into()))
}

pub fn provider_by_name(name: &str) -> Option<Arc<Provider>> {
    PROVIDERS
        .read()
        .unwrap()
        .iter()
        .find(|p| p.name() == name)
        .cloned()
}

/// All installed providers, in installation order.
pub fn installed_providers() -> Vec<Arc<Provider>> {
    PROVIDERS.read().unwrap().clone()
}
