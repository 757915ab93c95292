// Album entity

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use super::{Artist, Field, Image, Page, Track};

/// A catalog album.
///
/// The simplified shape (embedded in tracks, artist album lists and new
/// releases) lacks `copyrights`, `external_ids`, `genres`, `label`,
/// `popularity` and `tracks`. `album_group` only appears in artist album
/// lists.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Album {
    pub album_group: Option<String>,
    pub album_type: String,
    #[serde(default)]
    pub artists: Field<Vec<Artist>>,
    pub available_markets: Option<Vec<String>>,
    #[serde(default)]
    pub copyrights: Field<Vec<Copyright>>,
    pub external_ids: Option<HashMap<String, String>>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
    pub genres: Option<Vec<String>>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub images: Field<Vec<Image>>,
    pub is_playable: Option<bool>,
    pub label: Option<String>,
    pub name: String,
    pub popularity: Option<u32>,
    pub release_date: String,
    pub release_date_precision: String,
    pub total_tracks: u32,
    /// Track page of a full album. Not part of the schema walk; the album
    /// lookup resolves it separately.
    #[serde(default)]
    pub tracks: Field<Page<Track>>,
    #[serde(rename = "type")]
    pub object_type: String,
    pub uri: String,
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Copyright statement of an album
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Copyright {
    pub text: String,
    /// "C" for the copyright, "P" for the performance copyright
    #[serde(rename = "type")]
    pub kind: String,
}

impl fmt::Display for Copyright {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
