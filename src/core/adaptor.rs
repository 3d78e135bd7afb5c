/*!
Bridging between immediate (blocking) and deferred (async) call sites.

Every operation has exactly one native execution style; the adaptors in
this module are the only place the two styles cross. An engine bundles the
adaptors it supports into an [`ExecutorBridge`]; asking the bridge for a
direction it was not given fails with [`Error::AdaptorMissing`], which is a
configuration error and never retried.

[`Error::AdaptorMissing`]: crate::core::error::Error::AdaptorMissing
*/

use std::fmt;

/// The two caller concurrency contracts an operation can be invoked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStyle {
    /// The caller blocks its own thread until the result is ready.
    Immediate,
    /// The caller suspends and is resumed once the result is ready.
    Deferred,
}

impl fmt::Display for ExecutionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStyle::Immediate => f.write_str("immediate"),
            ExecutionStyle::Deferred => f.write_str("deferred"),
        }
    }
}

#[cfg(feature = "async")]
mod bridge {
    use std::future::Future;
    use std::sync::mpsc;

    use tracing::trace;

    use super::ExecutionStyle;
    use crate::core::error::{Error, Result};

    /// Runs deferred-style work to completion for an immediate caller.
    ///
    /// The future is spawned onto a runtime owned by the adaptor, so the
    /// calling thread parks on a plain channel instead of driving the
    /// future itself. Bridging therefore never occupies a worker of
    /// whatever scheduler the caller happens to be running under.
    pub struct BlockingAdaptor {
        runtime: tokio::runtime::Runtime,
    }

    impl BlockingAdaptor {
        pub fn new() -> Result<Self> {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("crypto-facade-bridge")
                .enable_all()
                .build()?;
            Ok(Self { runtime })
        }

        pub fn execute<T, W>(&self, work: W) -> Result<T>
        where
            W: Future<Output = Result<T>> + Send + 'static,
            T: Send + 'static,
        {
            trace!("bridging deferred work for an immediate caller");
            let (tx, rx) = mpsc::channel();
            self.runtime.spawn(async move {
                let _ = tx.send(work.await);
            });
            rx.recv()
                .map_err(|_| Error::Internal("bridge worker dropped its result".into()))?
        }
    }

    /// Runs immediate-style work for a deferred caller.
    ///
    /// The closure moves to a blocking worker pool and the calling task
    /// suspends until it completes; no thread the deferred runtime needs
    /// for progress is blocked.
    #[derive(Debug, Default)]
    pub struct SuspendAdaptor;

    impl SuspendAdaptor {
        pub fn new() -> Self {
            Self
        }

        pub async fn execute<T, W>(&self, work: W) -> Result<T>
        where
            W: FnOnce() -> Result<T> + Send + 'static,
            T: Send + 'static,
        {
            trace!("offloading blocking work for a deferred caller");
            tokio::task::spawn_blocking(work)
                .await
                .map_err(|e| Error::Internal(format!("bridge worker failed: {e}")))?
        }
    }

    impl super::ExecutorBridge {
        pub fn with_blocking(mut self, adaptor: BlockingAdaptor) -> Self {
            self.blocking = Some(adaptor);
            self
        }

        pub fn with_suspend(mut self, adaptor: SuspendAdaptor) -> Self {
            self.suspend = Some(adaptor);
            self
        }

        /// Run deferred-style `work` for an immediate caller.
        pub fn run_blocking<T, W>(&self, work: W) -> Result<T>
        where
            W: Future<Output = Result<T>> + Send + 'static,
            T: Send + 'static,
        {
            match &self.blocking {
                Some(adaptor) => adaptor.execute(work),
                None => Err(Error::AdaptorMissing {
                    style: ExecutionStyle::Immediate,
                    engine: self.engine,
                }),
            }
        }

        /// Run immediate-style `work` for a deferred caller.
        pub async fn run_deferred<T, W>(&self, work: W) -> Result<T>
        where
            W: FnOnce() -> Result<T> + Send + 'static,
            T: Send + 'static,
        {
            match &self.suspend {
                Some(adaptor) => adaptor.execute(work).await,
                None => Err(Error::AdaptorMissing {
                    style: ExecutionStyle::Deferred,
                    engine: self.engine,
                }),
            }
        }
    }
}

#[cfg(feature = "async")]
pub use bridge::{BlockingAdaptor, SuspendAdaptor};

/// Per-engine adaptor pair.
///
/// An engine supplies whichever bridging directions it supports when the
/// provider is assembled; the pair is fixed for the engine's lifetime.
pub struct ExecutorBridge {
    engine: &'static str,
    #[cfg(feature = "async")]
    blocking: Option<BlockingAdaptor>,
    #[cfg(feature = "async")]
    suspend: Option<SuspendAdaptor>,
}

impl ExecutorBridge {
    /// A bridge with no adaptors; every bridged call fails.
    pub fn new(engine: &'static str) -> Self {
        Self {
            engine,
            #[cfg(feature = "async")]
            blocking: None,
            #[cfg(feature = "async")]
            suspend: None,
        }
    }

    /// A bridge carrying the adaptors an immediate-native engine needs.
    pub fn with_defaults(engine: &'static str) -> Self {
        let bridge = Self::new(engine);
        #[cfg(feature = "async")]
        let bridge = bridge.with_suspend(SuspendAdaptor::new());
        bridge
    }

    pub fn engine(&self) -> &'static str {
        self.engine
    }
}
