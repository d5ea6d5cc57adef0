use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Weak};

use tracing::{error, trace, warn};

use crate::loader::LoadError;
use crate::presenter::{DelegateResult, ResourceDelegate};

/// Fans lifecycle events out to several delegates in registration order.
///
/// Holds weak references: the host owns its delegates, and a delegate dropped
/// mid-load is skipped. A delegate that errors or panics is logged and the
/// remaining delegates still receive the event.
pub struct DelegateMulticaster<M> {
    delegates: Vec<Weak<dyn ResourceDelegate<M>>>,
}

impl<M> Default for DelegateMulticaster<M> {
    fn default() -> Self {
        Self {
            delegates: Vec::new(),
        }
    }
}

impl<M> DelegateMulticaster<M>
where
    M: 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<D>(mut self, delegate: &Arc<D>) -> Self
    where
        D: ResourceDelegate<M> + 'static,
    {
        self.register(delegate);
        self
    }

    pub fn register<D>(&mut self, delegate: &Arc<D>)
    where
        D: ResourceDelegate<M> + 'static,
    {
        let delegate: Arc<dyn ResourceDelegate<M>> = delegate.clone();
        self.register_dyn(&delegate);
    }

    pub fn register_dyn(&mut self, delegate: &Arc<dyn ResourceDelegate<M>>) {
        self.delegates.push(Arc::downgrade(delegate));
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    fn for_each(&self, event: &str, notify: impl Fn(&dyn ResourceDelegate<M>) -> DelegateResult) {
        for (index, delegate) in self.delegates.iter().enumerate() {
            let Some(delegate) = delegate.upgrade() else {
                trace!("Delegate #{} dropped, skipping {}", index, event);
                continue;
            };

            match catch_unwind(AssertUnwindSafe(|| notify(delegate.as_ref()))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Delegate #{} {} failed: {}", index, event, e),
                Err(_) => error!("Delegate #{} panicked in {}", index, event),
            }
        }
    }
}

impl<M> ResourceDelegate<M> for DelegateMulticaster<M>
where
    M: Send + Sync + 'static,
{
    fn did_start_loading(&self) -> DelegateResult {
        self.for_each("did_start_loading", |d| d.did_start_loading());
        Ok(())
    }

    fn did_finish_loading(&self, model: &M) -> DelegateResult {
        self.for_each("did_finish_loading", |d| d.did_finish_loading(model));
        Ok(())
    }

    fn did_fail_loading(&self, error: &LoadError) -> DelegateResult {
        self.for_each("did_fail_loading", |d| d.did_fail_loading(error));
        Ok(())
    }
}
