//! # Episodic
//!
//! A Rick and Morty API client built around one generic resource-loading
//! state machine.
//!
//! ## Architecture
//!
//! Every screen is the same pipeline with different types plugged in:
//!
//! ```text
//! Fetcher → RemoteLoader → [decorators] → ResourcePresenter → delegates → ViewStateStore
//! ```
//!
//! - [`loader`]: turns a URL into a domain item; decorators add shuffling and
//!   simulated faults
//! - [`presenter`]: runs one load at a time and reports start, finish and
//!   failure to its delegate
//! - [`features`]: the episode feed and character card wired from the above
//!
//! ## Quick Start
//!
//! ```bash
//! # First two pages of episodes
//! episodic episodes --pages 2
//!
//! # One character, with its avatar
//! episodic character https://rickandmortyapi.com/api/character/1 --image
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together config,
/// fetcher and the character card cache.
pub mod app;

/// In-memory LRU of character cards keyed by URL.
pub mod cache;

/// Command-line interface using clap.
///
/// - `episodes [--pages N] [--no-shuffle]` - List episodes
/// - `character <url> [--image]` - Show one character
pub mod cli;

/// Configuration loaded from `~/.config/episodic/config.toml`.
pub mod config;

/// JSON wire format of the API.
pub mod decoder;

/// Core domain models.
///
/// - [`Page`](domain::Page): results plus pagination info
/// - [`Episode`](domain::Episode) and [`Character`](domain::Character)
pub mod domain;

/// Episode feed and character card.
pub mod features;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for a single GET
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Loaders and loader decorators.
pub mod loader;

/// Pure mappers from domain items to presentation models.
pub mod presentation;

/// The resource presenter and its delegates.
pub mod presenter;

#[cfg(test)]
mod test_support;
