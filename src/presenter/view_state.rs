use tokio::sync::watch;

use crate::loader::LoadError;
use crate::presenter::{DelegateResult, ResourceDelegate};

/// Shown for every failure; the error kind is not exposed to the view.
pub const CONNECTION_ERROR_MESSAGE: &str = "Couldn't connect to server";

/// What a view renders for one resource.
///
/// After the first completed load exactly one of `item` and `error_message`
/// is set, except that a failure keeps the last good `item` visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadState<M> {
    pub is_loading: bool,
    pub item: Option<M>,
    pub error_message: Option<String>,
}

impl<M> Default for LoadState<M> {
    fn default() -> Self {
        Self {
            is_loading: false,
            item: None,
            error_message: None,
        }
    }
}

/// Terminal delegate holding a [`LoadState`] that views can watch.
///
/// Only the three delegate callbacks mutate the state.
pub struct ViewStateStore<M> {
    state: watch::Sender<LoadState<M>>,
}

impl<M> Default for ViewStateStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> ViewStateStore<M> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(LoadState::default());
        Self { state }
    }

    pub fn snapshot(&self) -> LoadState<M>
    where
        M: Clone,
    {
        self.state.borrow().clone()
    }

    pub fn current_item(&self) -> Option<M>
    where
        M: Clone,
    {
        self.state.borrow().item.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// A receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<M>> {
        self.state.subscribe()
    }
}

impl<M> ResourceDelegate<M> for ViewStateStore<M>
where
    M: Clone + Send + Sync,
{
    fn did_start_loading(&self) -> DelegateResult {
        self.state.send_modify(|state| {
            state.error_message = None;
            state.is_loading = true;
        });
        Ok(())
    }

    fn did_finish_loading(&self, model: &M) -> DelegateResult {
        self.state.send_modify(|state| {
            state.item = Some(model.clone());
            state.error_message = None;
            state.is_loading = false;
        });
        Ok(())
    }

    fn did_fail_loading(&self, _error: &LoadError) -> DelegateResult {
        self.state.send_modify(|state| {
            state.error_message = Some(CONNECTION_ERROR_MESSAGE.to_string());
            state.is_loading = false;
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_is_empty() {
        let sut = ViewStateStore::<String>::new();

        assert_eq!(sut.snapshot(), LoadState::default());
    }

    #[test]
    fn test_start_clears_error_and_sets_loading() {
        let sut = ViewStateStore::<String>::new();
        sut.did_fail_loading(&LoadError::Connectivity).unwrap();

        sut.did_start_loading().unwrap();

        let state = sut.snapshot();
        assert!(state.is_loading);
        assert!(state.error_message.is_none());
        assert!(state.item.is_none());
    }

    #[test]
    fn test_failure_shows_connection_error_and_stops_loading() {
        let sut = ViewStateStore::<String>::new();
        sut.did_start_loading().unwrap();

        sut.did_fail_loading(&LoadError::InvalidData).unwrap();

        let state = sut.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error_message.as_deref(), Some("Couldn't connect to server"));
        assert!(state.item.is_none());
    }

    #[test]
    fn test_finish_sets_item_and_stops_loading() {
        let sut = ViewStateStore::<String>::new();
        sut.did_start_loading().unwrap();

        sut.did_finish_loading(&"Any message".to_string()).unwrap();

        let state = sut.snapshot();
        assert_eq!(state.item.as_deref(), Some("Any message"));
        assert!(!state.is_loading);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_failure_keeps_last_good_item() {
        let sut = ViewStateStore::<String>::new();
        sut.did_finish_loading(&"first".to_string()).unwrap();

        sut.did_start_loading().unwrap();
        sut.did_fail_loading(&LoadError::Connectivity).unwrap();

        let state = sut.snapshot();
        assert_eq!(state.item.as_deref(), Some("first"));
        assert!(state.error_message.is_some());
    }

    #[test]
    fn test_success_after_failure_clears_error() {
        let sut = ViewStateStore::<String>::new();
        sut.did_fail_loading(&LoadError::Connectivity).unwrap();

        sut.did_finish_loading(&"second".to_string()).unwrap();

        assert!(sut.snapshot().error_message.is_none());
        assert_eq!(sut.current_item().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let sut = ViewStateStore::<u8>::new();
        let mut rx = sut.subscribe();

        sut.did_start_loading().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading);

        sut.did_finish_loading(&3).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().item, Some(3));
    }
}
