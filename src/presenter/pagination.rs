use std::sync::Arc;

use tracing::debug;

use crate::domain::Page;
use crate::loader::LoadError;
use crate::presenter::{DelegateResult, ResourceDelegate};

/// Delegate for a "load more" request.
///
/// Prepends the results already on screen to each newly loaded page and
/// forwards the merged page downstream. Start and failure events are
/// swallowed so a background page fetch never blanks or errors the list
/// that is already displayed.
pub struct PaginationAccumulator<T> {
    previous: Page<T>,
    downstream: Arc<dyn ResourceDelegate<Page<T>>>,
}

impl<T> PaginationAccumulator<T> {
    pub fn new(previous: Page<T>, downstream: Arc<dyn ResourceDelegate<Page<T>>>) -> Self {
        Self {
            previous,
            downstream,
        }
    }
}

impl<T> ResourceDelegate<Page<T>> for PaginationAccumulator<T>
where
    T: Clone + Send + Sync,
{
    fn did_start_loading(&self) -> DelegateResult {
        Ok(())
    }

    fn did_finish_loading(&self, page: &Page<T>) -> DelegateResult {
        let merged = self.previous.merged_with(page);
        debug!(
            "Merged {} new results onto {} ({} total)",
            page.results.len(),
            self.previous.results.len(),
            merged.results.len()
        );
        self.downstream.did_finish_loading(&merged)
    }

    fn did_fail_loading(&self, error: &LoadError) -> DelegateResult {
        debug!(
            "Load more failed ({}); keeping {} results",
            error,
            self.previous.results.len()
        );
        Ok(())
    }
}
