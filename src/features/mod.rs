//! Screens assembled from the generic loading machinery.

pub mod characters;
pub mod episodes;

use crate::config::Config;
use crate::loader::FaultPolicy;

pub use characters::CharacterCard;
pub use episodes::EpisodeFeed;

/// Decorators applied to every loader a feature builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub shuffle_characters: bool,
    /// `None` disables fault injection.
    pub faults: Option<FaultPolicy>,
}

impl LoadOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            shuffle_characters: config.episodes.shuffle_characters,
            faults: config
                .faults
                .enabled
                .then(|| FaultPolicy::from(&config.faults)),
        }
    }
}
