use std::sync::Arc;

use parking_lot::Mutex;
use url::Url;

use crate::domain::Character;
use crate::features::LoadOptions;
use crate::fetcher::Fetcher;
use crate::loader::{BoxLoader, LoaderExt, LoaderPipeline, RemoteLoader};
use crate::presentation::{
    present_character, present_image, CharacterPresentation, ImagePresentation,
};
use crate::presenter::{LoadOutcome, LoadState, ResourceDelegate, ResourcePresenter, ViewStateStore};

type ImagePresenter = ResourcePresenter<BoxLoader<Vec<u8>>, ImagePresentation>;

/// One character's details plus its avatar, loaded on demand.
///
/// The image is fetched from the image URL of the character currently
/// displayed; its presenter is kept while that URL stays the same. Only image
/// loads go through fault injection.
pub struct CharacterCard {
    url: Url,
    fetcher: Arc<dyn Fetcher>,
    options: LoadOptions,
    character_state: Arc<ViewStateStore<CharacterPresentation>>,
    image_state: Arc<ViewStateStore<ImagePresentation>>,
    character: ResourcePresenter<BoxLoader<Character>, CharacterPresentation>,
    image: Mutex<Option<(Url, Arc<ImagePresenter>)>>,
}

impl CharacterCard {
    pub fn new(url: Url, fetcher: Arc<dyn Fetcher>, options: LoadOptions) -> Self {
        let character_state = Arc::new(ViewStateStore::<CharacterPresentation>::new());
        let delegate: Arc<dyn ResourceDelegate<CharacterPresentation>> = character_state.clone();
        let loader = RemoteLoader::character(url.clone(), Arc::clone(&fetcher)).boxed();
        let character = ResourcePresenter::new(loader, delegate, present_character);

        Self {
            url,
            fetcher,
            options,
            character_state,
            image_state: Arc::new(ViewStateStore::new()),
            character,
            image: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn load(&self) -> LoadOutcome {
        self.character.load().await
    }

    /// Loads the displayed character's image. `None` until a character is shown.
    pub async fn load_image(&self) -> Option<LoadOutcome> {
        let presenter = self.image_presenter()?;
        Some(presenter.load().await)
    }

    pub fn state(&self) -> LoadState<CharacterPresentation> {
        self.character_state.snapshot()
    }

    pub fn image_state(&self) -> LoadState<ImagePresentation> {
        self.image_state.snapshot()
    }

    fn image_presenter(&self) -> Option<Arc<ImagePresenter>> {
        let image_url = self.character_state.current_item()?.image;

        let mut image = self.image.lock();
        if let Some((url, presenter)) = image.as_ref() {
            if *url == image_url {
                return Some(Arc::clone(presenter));
            }
        }

        let delegate: Arc<dyn ResourceDelegate<ImagePresentation>> = self.image_state.clone();
        let loader = image_loader(image_url.clone(), &self.fetcher, self.options);
        let presenter = Arc::new(ResourcePresenter::new(loader, delegate, present_image));
        *image = Some((image_url, Arc::clone(&presenter)));
        Some(presenter)
    }
}

fn image_loader(url: Url, fetcher: &Arc<dyn Fetcher>, options: LoadOptions) -> BoxLoader<Vec<u8>> {
    let mut pipeline = LoaderPipeline::<Vec<u8>>::new();
    if let Some(policy) = options.faults {
        pipeline = pipeline.stage(move |loader| loader.with_faults(policy).boxed());
    }
    pipeline.build(RemoteLoader::image(url, Arc::clone(fetcher)))
}
