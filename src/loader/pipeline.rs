use crate::loader::{BoxLoader, FaultInjecting, FaultPolicy, Loader};

/// Decorator shortcuts available on every loader.
pub trait LoaderExt: Loader + Sized + 'static {
    fn boxed(self) -> BoxLoader<Self::Item> {
        Box::new(self)
    }

    fn with_faults(self, policy: FaultPolicy) -> FaultInjecting<Self> {
        FaultInjecting::new(self, policy)
    }
}

impl<L> LoaderExt for L where L: Loader + Sized + 'static {}

type Stage<T> = Box<dyn FnOnce(BoxLoader<T>) -> BoxLoader<T> + Send>;

/// An ordered list of decorators applied left to right over a base loader.
///
/// ```rust,ignore
/// let loader = LoaderPipeline::new()
///     .stage(|l| ShuffleEach::characters(l).boxed())
///     .stage_if(faults_enabled, move |l| l.with_faults(policy).boxed())
///     .build(RemoteLoader::episodes(url, fetcher));
/// ```
pub struct LoaderPipeline<T> {
    stages: Vec<Stage<T>>,
}

impl<T> Default for LoaderPipeline<T>
where
    T: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LoaderPipeline<T>
where
    T: Send + 'static,
{
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn stage<F>(mut self, decorate: F) -> Self
    where
        F: FnOnce(BoxLoader<T>) -> BoxLoader<T> + Send + 'static,
    {
        self.stages.push(Box::new(decorate));
        self
    }

    pub fn stage_if<F>(self, enabled: bool, decorate: F) -> Self
    where
        F: FnOnce(BoxLoader<T>) -> BoxLoader<T> + Send + 'static,
    {
        if enabled {
            self.stage(decorate)
        } else {
            self
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn build<L>(self, base: L) -> BoxLoader<T>
    where
        L: Loader<Item = T> + 'static,
    {
        self.stages
            .into_iter()
            .fold(base.boxed(), |loader, decorate| decorate(loader))
    }
}
