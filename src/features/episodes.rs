use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;
use url::Url;

use crate::domain::{Episode, Page};
use crate::features::LoadOptions;
use crate::fetcher::Fetcher;
use crate::loader::{BoxLoader, LoaderExt, LoaderPipeline, RemoteLoader, ShuffleEach};
use crate::presentation::{present_episodes, EpisodePagePresentation, EpisodePresentation};
use crate::presenter::{
    DelegateMulticaster, LoadOutcome, LoadState, PaginationAccumulator, ResourceDelegate,
    ResourcePresenter, TrackingObserver, ViewStateStore,
};

type EpisodePresenter = ResourcePresenter<BoxLoader<Page<Episode>>, EpisodePagePresentation>;

/// Presenter and delegates for one "load more" URL.
struct LoadMore {
    url: Url,
    presenter: Arc<EpisodePresenter>,
    // The presenter's multicaster only holds weak references.
    _accumulator: Arc<PaginationAccumulator<EpisodePresentation>>,
}

/// The paginated episode list.
///
/// The first page reports to every tracking observer and to the view store.
/// Each later page goes to the observers and, through a
/// [`PaginationAccumulator`], to the same store, so the list only grows.
pub struct EpisodeFeed {
    first_page_url: Url,
    fetcher: Arc<dyn Fetcher>,
    options: LoadOptions,
    store: Arc<ViewStateStore<EpisodePagePresentation>>,
    observers: Vec<Arc<TrackingObserver>>,
    first_page: EpisodePresenter,
    more: Mutex<Option<LoadMore>>,
}

impl EpisodeFeed {
    pub fn new(
        first_page_url: Url,
        fetcher: Arc<dyn Fetcher>,
        options: LoadOptions,
        tracking_labels: &[String],
    ) -> Self {
        let store = Arc::new(ViewStateStore::<EpisodePagePresentation>::new());
        let observers: Vec<Arc<TrackingObserver>> = tracking_labels
            .iter()
            .map(|label| Arc::new(TrackingObserver::new(label.as_str())))
            .collect();

        let mut delegates = observers_multicaster(&observers);
        delegates.register(&store);
        let delegates: Arc<dyn ResourceDelegate<EpisodePagePresentation>> = Arc::new(delegates);
        let loader = episodes_loader(first_page_url.clone(), &fetcher, options);
        let first_page = ResourcePresenter::new(loader, delegates, present_episodes);

        Self {
            first_page_url,
            fetcher,
            options,
            store,
            observers,
            first_page,
            more: Mutex::new(None),
        }
    }

    pub fn first_page_url(&self) -> &Url {
        &self.first_page_url
    }

    /// Loads the first page, replacing whatever is displayed.
    ///
    /// Once the new first page is shown, any load more still in flight is
    /// discarded: its accumulator is dropped, so the page it was extending
    /// never reaches the store.
    pub async fn load(&self) -> LoadOutcome {
        let outcome = self.first_page.load().await;
        if outcome == LoadOutcome::Loaded {
            if let Some(stale) = self.more.lock().take() {
                debug!("Discarding load more for {} after reload", stale.url);
            }
        }
        outcome
    }

    /// Loads the page after the displayed one and appends it.
    ///
    /// Returns `None` when nothing is displayed yet or the last page is shown.
    pub async fn load_more(&self) -> Option<LoadOutcome> {
        let presenter = self.load_more_presenter()?;
        Some(presenter.load().await)
    }

    pub fn can_load_more(&self) -> bool {
        self.store
            .current_item()
            .is_some_and(|page| page.next_page().is_some())
    }

    pub fn state(&self) -> LoadState<EpisodePagePresentation> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState<EpisodePagePresentation>> {
        self.store.subscribe()
    }

    fn load_more_presenter(&self) -> Option<Arc<EpisodePresenter>> {
        let current = self.store.current_item()?;
        let next = current.next_page()?.clone();

        let mut more = self.more.lock();
        if let Some(existing) = more.as_ref().filter(|m| m.url == next) {
            return Some(Arc::clone(&existing.presenter));
        }

        debug!("Preparing load more for {}", next);
        let downstream: Arc<dyn ResourceDelegate<EpisodePagePresentation>> = self.store.clone();
        let accumulator = Arc::new(PaginationAccumulator::new(current, downstream));
        let mut delegates = observers_multicaster(&self.observers);
        delegates.register(&accumulator);
        let delegates: Arc<dyn ResourceDelegate<EpisodePagePresentation>> = Arc::new(delegates);

        let loader = episodes_loader(next.clone(), &self.fetcher, self.options);
        let presenter = Arc::new(ResourcePresenter::new(loader, delegates, present_episodes));

        *more = Some(LoadMore {
            url: next,
            presenter: Arc::clone(&presenter),
            _accumulator: accumulator,
        });
        Some(presenter)
    }
}

fn observers_multicaster(
    observers: &[Arc<TrackingObserver>],
) -> DelegateMulticaster<EpisodePagePresentation> {
    let mut delegates = DelegateMulticaster::new();
    for observer in observers {
        delegates.register(observer);
    }
    delegates
}

fn episodes_loader(
    url: Url,
    fetcher: &Arc<dyn Fetcher>,
    options: LoadOptions,
) -> BoxLoader<Page<Episode>> {
    LoaderPipeline::<Page<Episode>>::new()
        .stage_if(options.shuffle_characters, |loader| {
            ShuffleEach::characters(loader).boxed()
        })
        .build(RemoteLoader::episodes(url, Arc::clone(fetcher)))
}
