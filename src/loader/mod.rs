pub mod decorators;
pub mod pipeline;
pub mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use decorators::{FaultInjecting, FaultPolicy, ShuffleEach};
pub use pipeline::{LoaderExt, LoaderPipeline};
pub use remote::RemoteLoader;

/// Why a `load()` did not produce a presentation model.
///
/// Callers only ever see one of these kinds; the underlying transport or
/// decoding error is logged where it happens and not carried further.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// No HTTP response was obtained.
    #[error("could not reach the server")]
    Connectivity,

    /// A response arrived but its status was not 200 or its body did not decode.
    #[error("the server returned invalid data")]
    InvalidData,

    /// The presentation mapper rejected the loaded item.
    #[error("could not present resource: {0}")]
    Mapping(String),

    /// Synthetic failure from [`FaultInjecting`].
    #[error("simulated failure")]
    Simulated,
}

/// Produces one domain item per call.
#[async_trait]
pub trait Loader: Send + Sync {
    type Item: Send;

    async fn load(&self) -> Result<Self::Item, LoadError>;
}

pub type BoxLoader<T> = Box<dyn Loader<Item = T>>;

#[async_trait]
impl<L> Loader for Box<L>
where
    L: Loader + ?Sized,
{
    type Item = L::Item;

    async fn load(&self) -> Result<Self::Item, LoadError> {
        (**self).load().await
    }
}

#[async_trait]
impl<L> Loader for Arc<L>
where
    L: Loader + ?Sized,
{
    type Item = L::Item;

    async fn load(&self) -> Result<Self::Item, LoadError> {
        (**self).load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubLoader;

    #[test]
    fn test_boxed_and_shared_loaders_delegate() {
        let shared = Arc::new(StubLoader::ok(5u8));
        let boxed: BoxLoader<u8> = Box::new(shared.clone());

        assert_eq!(tokio_test::block_on(boxed.load()), Ok(5));
        assert_eq!(tokio_test::block_on(shared.load()), Ok(5));
        assert_eq!(shared.calls(), 2);
    }
}
