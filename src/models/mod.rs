// Domain entities of the catalog API

mod album;
mod artist;
mod audio_analysis;
mod field;
mod image;
mod recommendations;
mod search;
mod track;

pub use album::{Album, Copyright};
pub use artist::{Artist, Followers};
pub use audio_analysis::{AudioAnalysis, Tonality};
pub use field::Field;
pub use image::Image;
pub use recommendations::{RecommendationSeed, RecommendationSeeds, Recommendations, MAX_SEEDS};
pub use search::{Page, Search, SearchType};
pub use track::Track;

use std::fmt;

// ==================================================================================================
// Entity kinds
// ==================================================================================================

/// Closed set of entity kinds the hydrator can construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Track,
    Album,
    Artist,
    Image,
    Copyright,
    Followers,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Track => "Track",
            EntityKind::Album => "Album",
            EntityKind::Artist => "Artist",
            EntityKind::Image => "Image",
            EntityKind::Copyright => "Copyright",
            EntityKind::Followers => "Followers",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ==================================================================================================
// Entity
// ==================================================================================================

/// A hydrated entity of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Track(Track),
    Album(Album),
    Artist(Artist),
    Image(Image),
    Copyright(Copyright),
    Followers(Followers),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Track(_) => EntityKind::Track,
            Entity::Album(_) => EntityKind::Album,
            Entity::Artist(_) => EntityKind::Artist,
            Entity::Image(_) => EntityKind::Image,
            Entity::Copyright(_) => EntityKind::Copyright,
            Entity::Followers(_) => EntityKind::Followers,
        }
    }

    pub fn as_track(&self) -> Option<&Track> {
        match self {
            Entity::Track(track) => Some(track),
            _ => None,
        }
    }

    pub fn as_album(&self) -> Option<&Album> {
        match self {
            Entity::Album(album) => Some(album),
            _ => None,
        }
    }

    pub fn as_artist(&self) -> Option<&Artist> {
        match self {
            Entity::Artist(artist) => Some(artist),
            _ => None,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Track(e) => fmt::Display::fmt(e, f),
            Entity::Album(e) => fmt::Display::fmt(e, f),
            Entity::Artist(e) => fmt::Display::fmt(e, f),
            Entity::Image(e) => fmt::Display::fmt(e, f),
            Entity::Copyright(e) => fmt::Display::fmt(e, f),
            Entity::Followers(e) => fmt::Display::fmt(e, f),
        }
    }
}

/// `From<T> for Entity` and `TryFrom<Entity> for T` for every record type.
/// A failed conversion hands the entity back.
macro_rules! entity_conversions {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Entity {
                fn from(value: $variant) -> Self {
                    Entity::$variant(value)
                }
            }

            impl TryFrom<Entity> for $variant {
                type Error = Entity;

                fn try_from(entity: Entity) -> Result<Self, Self::Error> {
                    match entity {
                        Entity::$variant(value) => Ok(value),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

entity_conversions!(Track, Album, Artist, Image, Copyright, Followers);

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> Image {
        Image {
            height: Some(640),
            url: "https://i.example.com/a.jpg".to_string(),
            width: Some(640),
        }
    }

    #[test]
    fn test_entity_kind() {
        let entity = Entity::from(image());
        assert_eq!(entity.kind(), EntityKind::Image);
        assert_eq!(entity.kind().to_string(), "Image");
        assert_eq!(entity.to_string(), "640 x 640");
    }

    #[test]
    fn test_try_from_entity() {
        let entity = Entity::from(image());
        assert_eq!(Image::try_from(entity.clone()).unwrap(), image());

        let back = Followers::try_from(entity).unwrap_err();
        assert_eq!(back.kind(), EntityKind::Image);
    }
}
