use std::future::Future;

use tracing::warn;
use url::Url;

use crate::app::{AppContext, EpisodicError, Result};
use crate::features::EpisodeFeed;
use crate::presenter::LoadOutcome;

/// Loads are retried this many times in total, as a user tapping "retry" would.
const LOAD_ATTEMPTS: usize = 3;

async fn with_retries<F, Fut>(what: &str, mut load: F) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = LoadOutcome>,
{
    let mut attempt = 1;
    loop {
        match load().await {
            LoadOutcome::Loaded => return Ok(()),
            LoadOutcome::AlreadyLoading => return Ok(()),
            LoadOutcome::Failed(e) if attempt < LOAD_ATTEMPTS => {
                warn!("Loading {} failed (attempt {}): {}", what, attempt, e);
                attempt += 1;
            }
            LoadOutcome::Failed(e) => return Err(EpisodicError::Load(e)),
        }
    }
}

/// Loads up to `pages` pages. A page that keeps failing ends pagination
/// and leaves the pages already loaded in place.
pub async fn load_feed(ctx: &AppContext, pages: usize) -> Result<EpisodeFeed> {
    let feed = ctx.episode_feed()?;

    with_retries("first page", || feed.load()).await?;

    let shown = &feed;
    let mut loaded = 1;
    while loaded < pages && feed.can_load_more() {
        let next_page = with_retries("next page", move || async move {
            shown.load_more().await.unwrap_or(LoadOutcome::Loaded)
        });
        if let Err(e) = next_page.await {
            warn!("Stopped after {} pages: {}", loaded, e);
            break;
        }
        loaded += 1;
    }

    Ok(feed)
}

pub async fn list_episodes(ctx: &AppContext, pages: usize) -> Result<()> {
    let feed = load_feed(ctx, pages).await?;

    let Some(page) = feed.state().item else {
        println!("No episodes");
        return Ok(());
    };

    for episode in &page.results {
        println!(
            "{}  {} ({} characters)",
            episode.code,
            episode.name,
            episode.characters.len()
        );
    }
    println!(
        "Showing {} of {} episodes",
        page.results.len(),
        page.info.count
    );
    if let Some(next) = page.next_page() {
        println!("More: {}", next);
    }

    Ok(())
}

pub async fn show_character(ctx: &AppContext, url: &str, with_image: bool) -> Result<()> {
    let url = Url::parse(url)?;
    let card = ctx.character_card(&url);
    let card = card.as_ref();

    with_retries("character", || card.load()).await?;

    let Some(character) = card.state().item else {
        return Err(EpisodicError::Other(format!("No character at {}", url)));
    };
    println!("{}", character.name);
    println!("{}", character.status);
    println!("{}", character.origin);
    println!("{}", character.location);

    if with_image {
        with_retries("image", move || async move {
            card.load_image().await.unwrap_or(LoadOutcome::Loaded)
        })
        .await?;

        if let Some(image) = card.image_state().item {
            println!(
                "Image: {:?}, {} bytes ({})",
                image.format,
                image.bytes.len(),
                character.image
            );
        }
    }

    Ok(())
}
