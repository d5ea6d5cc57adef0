//! Test doubles and fixtures shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::oneshot;
use url::Url;

use crate::app::{EpisodicError, Result};
use crate::domain::{Character, Episode, Location, Page, PageInfo};
use crate::fetcher::{Fetcher, HttpResponse};
use crate::loader::{LoadError, Loader};
use crate::presenter::{DelegateError, DelegateResult, ResourceDelegate};

pub fn any_url() -> Url {
    Url::parse("https://any-url.com/").unwrap()
}

fn created() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2017-11-10T12:56:33.798Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn sample_episode(id: u32) -> Episode {
    Episode {
        id,
        name: format!("Episode {}", id),
        air_date: "December 2, 2013".to_string(),
        episode: format!("S01E{:02}", id),
        url: Url::parse(&format!("https://api.test/episode/{}", id)).unwrap(),
        created: created(),
        characters: (1..=3)
            .map(|n| Url::parse(&format!("https://api.test/character/{}", id * 100 + n)).unwrap())
            .collect(),
    }
}

pub fn sample_page<T>(results: Vec<T>, prev: Option<&str>, next: Option<&str>) -> Page<T> {
    Page::new(
        PageInfo {
            count: 51,
            pages: 3,
            prev: prev.map(|u| Url::parse(u).unwrap()),
            next: next.map(|u| Url::parse(u).unwrap()),
        },
        results,
    )
}

pub fn sample_character(id: u32, status: &str) -> Character {
    Character {
        id,
        name: format!("Character {}", id),
        status: status.to_string(),
        species: "Human".to_string(),
        kind: String::new(),
        gender: "Male".to_string(),
        origin: Location {
            name: "earth (C-137)".to_string(),
            url: Some(Url::parse("https://api.test/location/1").unwrap()),
        },
        location: Location {
            name: "citadel of ricks".to_string(),
            url: None,
        },
        image: Url::parse(&format!("https://api.test/character/avatar/{}.jpeg", id)).unwrap(),
        created: created(),
    }
}

/// Fetcher answering from a script, in order, and recording every request.
#[derive(Default)]
pub struct StubFetcher {
    script: Mutex<VecDeque<Option<HttpResponse>>>,
    requested: Mutex<Vec<Url>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.script
            .lock()
            .push_back(Some(HttpResponse::new(status, body)));
    }

    pub fn fail(&self) {
        self.script.lock().push_back(None);
    }

    pub fn requested(&self) -> Vec<Url> {
        self.requested.lock().clone()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        self.requested.lock().push(url.clone());
        match self.script.lock().pop_front() {
            Some(Some(response)) => Ok(response),
            Some(None) => Err(EpisodicError::Other("connection refused".to_string())),
            None => Err(EpisodicError::Other(format!("nothing scripted for {}", url))),
        }
    }
}

/// Loader returning the same result on every call.
pub struct StubLoader<T> {
    result: std::result::Result<T, LoadError>,
    calls: AtomicUsize,
}

impl<T> StubLoader<T> {
    pub fn ok(item: T) -> Self {
        Self {
            result: Ok(item),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn err(error: LoadError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T> Loader for StubLoader<T>
where
    T: Clone + Send + Sync,
{
    type Item = T;

    async fn load(&self) -> std::result::Result<T, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// Calls that stay pending until the test completes them by index.
struct Gate<T> {
    pending: Mutex<Vec<Option<oneshot::Sender<T>>>>,
}

impl<T> Gate<T> {
    fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
        }
    }

    fn open(&self) -> oneshot::Receiver<T> {
        let (sender, receiver) = oneshot::channel();
        self.pending.lock().push(Some(sender));
        receiver
    }

    fn calls(&self) -> usize {
        self.pending.lock().len()
    }

    async fn wait_for_calls(&self, count: usize) {
        while self.calls() < count {
            tokio::task::yield_now().await;
        }
    }

    /// Completes call `index`, waiting for it to be made first.
    async fn complete(&self, index: usize, value: T) {
        loop {
            let sender = self
                .pending
                .lock()
                .get_mut(index)
                .and_then(Option::take);
            if let Some(sender) = sender {
                let _ = sender.send(value);
                return;
            }
            tokio::task::yield_now().await;
        }
    }
}

/// Loader whose calls stay pending until the test completes them by index.
pub struct GatedLoader<T> {
    gate: Gate<std::result::Result<T, LoadError>>,
}

impl<T> GatedLoader<T> {
    pub fn new() -> Self {
        Self { gate: Gate::new() }
    }

    pub fn calls(&self) -> usize {
        self.gate.calls()
    }

    pub async fn wait_for_calls(&self, count: usize) {
        self.gate.wait_for_calls(count).await
    }

    pub async fn complete(&self, index: usize, result: std::result::Result<T, LoadError>) {
        self.gate.complete(index, result).await
    }
}

#[async_trait]
impl<T> Loader for GatedLoader<T>
where
    T: Send,
{
    type Item = T;

    async fn load(&self) -> std::result::Result<T, LoadError> {
        let receiver = self.gate.open();
        receiver.await.unwrap_or(Err(LoadError::Connectivity))
    }
}

/// Fetcher whose requests stay pending until the test answers them by index.
pub struct GatedFetcher {
    gate: Gate<HttpResponse>,
}

impl GatedFetcher {
    pub fn new() -> Self {
        Self { gate: Gate::new() }
    }

    pub async fn wait_for_calls(&self, count: usize) {
        self.gate.wait_for_calls(count).await
    }

    pub async fn respond(&self, index: usize, status: u16, body: impl Into<Vec<u8>>) {
        self.gate
            .complete(index, HttpResponse::new(status, body))
            .await
    }
}

#[async_trait]
impl Fetcher for GatedFetcher {
    async fn get(&self, url: &Url) -> Result<HttpResponse> {
        let receiver = self.gate.open();
        receiver
            .await
            .map_err(|_| EpisodicError::Other(format!("request to {} abandoned", url)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<M> {
    Start,
    Finish(M),
    Fail(LoadError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behaviour {
    Healthy,
    Failing,
    PanicOnFinish,
}

/// Delegate recording every callback it receives.
pub struct RecordingDelegate<M> {
    messages: Mutex<Vec<Message<M>>>,
    behaviour: Behaviour,
}

impl<M> RecordingDelegate<M> {
    fn with(behaviour: Behaviour) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            behaviour,
        }
    }

    pub fn new() -> Self {
        Self::with(Behaviour::Healthy)
    }

    /// Records, then returns an error from every callback.
    pub fn failing() -> Self {
        Self::with(Behaviour::Failing)
    }

    /// Records, then panics in `did_finish_loading`.
    pub fn panicking() -> Self {
        Self::with(Behaviour::PanicOnFinish)
    }

    pub fn messages(&self) -> Vec<Message<M>>
    where
        M: Clone,
    {
        self.messages.lock().clone()
    }

    fn record(&self, message: Message<M>) -> DelegateResult {
        self.messages.lock().push(message);
        match self.behaviour {
            Behaviour::Failing => Err(DelegateError::new("recording delegate failure")),
            _ => Ok(()),
        }
    }
}

impl<M> ResourceDelegate<M> for RecordingDelegate<M>
where
    M: Clone + Send + Sync,
{
    fn did_start_loading(&self) -> DelegateResult {
        self.record(Message::Start)
    }

    fn did_finish_loading(&self, model: &M) -> DelegateResult {
        let result = self.record(Message::Finish(model.clone()));
        if self.behaviour == Behaviour::PanicOnFinish {
            panic!("recording delegate panicked on finish");
        }
        result
    }

    fn did_fail_loading(&self, error: &LoadError) -> DelegateResult {
        self.record(Message::Fail(error.clone()))
    }
}
