use tracing::info;

use crate::domain::Page;
use crate::loader::LoadError;
use crate::presenter::{DelegateResult, ResourceDelegate};

/// Analytics stand-in: records page load events through `tracing`.
#[derive(Debug, Clone)]
pub struct TrackingObserver {
    label: String,
}

impl TrackingObserver {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl<T> ResourceDelegate<Page<T>> for TrackingObserver
where
    T: Send + Sync,
{
    fn did_start_loading(&self) -> DelegateResult {
        info!(tracker = %self.label, "Start loading page");
        Ok(())
    }

    fn did_finish_loading(&self, page: &Page<T>) -> DelegateResult {
        info!(
            tracker = %self.label,
            results = page.results.len(),
            "Finished loading page"
        );
        Ok(())
    }

    fn did_fail_loading(&self, error: &LoadError) -> DelegateResult {
        info!(tracker = %self.label, %error, "Failed loading page");
        Ok(())
    }
}
