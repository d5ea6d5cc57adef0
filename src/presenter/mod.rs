//! The generic resource-loading state machine and the delegates it reports to.
//!
//! ```text
//! Loader → ResourcePresenter → DelegateMulticaster → { PaginationAccumulator → ViewStateStore,
//!                                                      TrackingObserver, ... }
//! ```

pub mod multicast;
pub mod pagination;
pub mod resource;
pub mod tracking;
pub mod view_state;

use thiserror::Error;

use crate::loader::LoadError;

pub use multicast::DelegateMulticaster;
pub use pagination::PaginationAccumulator;
pub use resource::{LoadOutcome, MappingError, ResourcePresenter};
pub use tracking::TrackingObserver;
pub use view_state::{LoadState, ViewStateStore, CONNECTION_ERROR_MESSAGE};

/// Error returned by a delegate callback. Never stops the load lifecycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("delegate failed: {0}")]
pub struct DelegateError(pub String);

impl DelegateError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type DelegateResult = Result<(), DelegateError>;

/// Observer of one presenter's load lifecycle.
///
/// For a single load, `did_start_loading` is always called before exactly one
/// of `did_finish_loading` / `did_fail_loading`.
pub trait ResourceDelegate<M>: Send + Sync {
    fn did_start_loading(&self) -> DelegateResult;

    fn did_finish_loading(&self, model: &M) -> DelegateResult;

    fn did_fail_loading(&self, error: &LoadError) -> DelegateResult;
}
