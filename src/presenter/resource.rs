use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::loader::{LoadError, Loader};
use crate::presenter::{DelegateResult, ResourceDelegate};

/// A presentation mapper rejected its input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct MappingError(pub String);

impl MappingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<MappingError> for LoadError {
    fn from(error: MappingError) -> Self {
        LoadError::Mapping(error.0)
    }
}

type Mapper<I, M> = Box<dyn Fn(I) -> Result<M, MappingError> + Send + Sync>;

/// What a call to [`ResourcePresenter::load`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed(LoadError),
    /// Another load on this presenter was in flight; nothing happened.
    AlreadyLoading,
}

/// Drives one loader and reports its lifecycle to a delegate.
///
/// At most one load runs per presenter: `load()` while a load is in flight is
/// dropped. Once a load finishes, successfully or not, the next `load()` runs
/// the loader again. Mapper failures go down the same path as loader failures.
pub struct ResourcePresenter<L, M>
where
    L: Loader,
{
    loader: L,
    delegate: Arc<dyn ResourceDelegate<M>>,
    mapper: Mapper<L::Item, M>,
    loading: AtomicBool,
}

impl<L, M> ResourcePresenter<L, M>
where
    L: Loader,
{
    pub fn new<F>(loader: L, delegate: Arc<dyn ResourceDelegate<M>>, mapper: F) -> Self
    where
        F: Fn(L::Item) -> Result<M, MappingError> + Send + Sync + 'static,
    {
        Self {
            loader,
            delegate,
            mapper: Box::new(mapper),
            loading: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub async fn load(&self) -> LoadOutcome {
        let Some(_in_flight) = InFlight::acquire(&self.loading) else {
            debug!("Load already in flight, ignoring request");
            return LoadOutcome::AlreadyLoading;
        };

        report("did_start_loading", self.delegate.did_start_loading());

        let result = match self.loader.load().await {
            Ok(item) => (self.mapper)(item).map_err(LoadError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(model) => {
                report("did_finish_loading", self.delegate.did_finish_loading(&model));
                LoadOutcome::Loaded
            }
            Err(error) => {
                warn!("Load failed: {}", error);
                report("did_fail_loading", self.delegate.did_fail_loading(&error));
                LoadOutcome::Failed(error)
            }
        }
    }

    /// Runs [`load`](Self::load) on its own task.
    pub fn spawn_load(self: &Arc<Self>) -> JoinHandle<LoadOutcome>
    where
        L: 'static,
        M: 'static,
    {
        let presenter = Arc::clone(self);
        tokio::spawn(async move { presenter.load().await })
    }
}

impl<L> ResourcePresenter<L, L::Item>
where
    L: Loader,
    L::Item: 'static,
{
    /// A presenter that hands the loaded item to the delegate as is.
    pub fn passthrough(loader: L, delegate: Arc<dyn ResourceDelegate<L::Item>>) -> Self {
        Self::new(loader, delegate, Ok)
    }
}

fn report(event: &str, result: DelegateResult) {
    if let Err(e) = result {
        warn!("Delegate {} failed: {}", event, e);
    }
}

/// Holds the in-flight flag; dropping it (including on unwind) clears it.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
