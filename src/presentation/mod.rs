//! Pure mappers from loaded domain items to display-ready models.

use url::Url;

use crate::domain::{Character, Episode, Page};
use crate::presenter::MappingError;

/// One row of the episode list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodePresentation {
    pub name: String,
    pub code: String,
    pub characters: Vec<Url>,
}

pub type EpisodePagePresentation = Page<EpisodePresentation>;

pub fn present_episodes(page: Page<Episode>) -> Result<EpisodePagePresentation, MappingError> {
    Ok(page.map(|episode| EpisodePresentation {
        name: episode.name,
        code: episode.episode,
        characters: episode.characters,
    }))
}

/// A character card's text plus the image it should load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPresentation {
    pub name: String,
    pub status: String,
    pub origin: String,
    pub location: String,
    pub image: Url,
}

pub fn present_character(character: Character) -> Result<CharacterPresentation, MappingError> {
    let status = if character.is_alive() {
        "🧡  Alive"
    } else {
        "☠️  Dead"
    };

    Ok(CharacterPresentation {
        status: status.to_string(),
        origin: format!("🌍  {}", capitalize_words(&character.origin.name)),
        location: format!("📍  {}", capitalize_words(&character.location.name)),
        name: character.name,
        image: character.image,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
}

impl ImageFormat {
    /// Recognises the format from the file signature.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(Self::WebP),
            _ => None,
        }
    }
}

/// Image bytes that carry a recognised image signature. Not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePresentation {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

pub fn present_image(bytes: Vec<u8>) -> Result<ImagePresentation, MappingError> {
    let format = ImageFormat::sniff(&bytes)
        .ok_or_else(|| MappingError::new(format!("not an image ({} bytes)", bytes.len())))?;
    Ok(ImagePresentation { format, bytes })
}

/// Upper-cases the first letter of every word and lower-cases the rest.
/// Any non-alphanumeric character starts a new word.
fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        word_start = !c.is_alphanumeric();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_character, sample_episode, sample_page};

    #[test]
    fn test_present_episodes_keeps_order_and_info() {
        let page = sample_page(
            vec![sample_episode(3), sample_episode(1)],
            None,
            Some("https://api.test/episode?page=2"),
        );

        let presented = present_episodes(page.clone()).unwrap();

        assert_eq!(presented.info, page.info);
        let names: Vec<&str> = presented.results.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Episode 3", "Episode 1"]);
        assert_eq!(presented.results[0].characters, page.results[0].characters);
        assert_eq!(presented.results[0].code, "S01E03");
    }

    #[test]
    fn test_present_alive_character() {
        let presented = present_character(sample_character(1, "Alive")).unwrap();

        assert_eq!(presented.name, "Character 1");
        assert_eq!(presented.status, "🧡  Alive");
        assert_eq!(presented.origin, "🌍  Earth (C-137)");
        assert_eq!(presented.location, "📍  Citadel Of Ricks");
    }

    #[test]
    fn test_present_dead_or_unknown_character() {
        assert_eq!(present_character(sample_character(1, "Dead")).unwrap().status, "☠️  Dead");
        assert_eq!(present_character(sample_character(1, "unknown")).unwrap().status, "☠️  Dead");
        assert_eq!(present_character(sample_character(1, "alive")).unwrap().status, "☠️  Dead");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("unknown"), "Unknown");
        assert_eq!(
            capitalize_words("earth (replacement dimension)"),
            "Earth (Replacement Dimension)"
        );
        assert_eq!(capitalize_words("earth (C-137)"), "Earth (C-137)");
        assert_eq!(capitalize_words("CITADEL of ricks"), "Citadel Of Ricks");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn test_sniff_image_formats() {
        assert_eq!(
            ImageFormat::sniff(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0]),
            Some(ImageFormat::Png)
        );
        assert_eq!(ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::sniff(b"GIF89a..."), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::sniff(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::sniff(b"<html>"), None);
        assert_eq!(ImageFormat::sniff(&[]), None);
    }

    #[test]
    fn test_present_image_rejects_non_images() {
        assert!(present_image(b"not an image".to_vec()).is_err());
        assert_eq!(
            present_image(vec![0xFF, 0xD8, 0xFF, 0xDB]).unwrap().format,
            ImageFormat::Jpeg
        );
    }
}
