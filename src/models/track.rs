// Track entity

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use super::{Album, Artist, Field};

/// A catalog track.
///
/// Simplified tracks (as embedded in albums and recommendations) come
/// without `album`, `external_ids` and `popularity`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub album: Field<Album>,
    #[serde(default)]
    pub artists: Field<Vec<Artist>>,
    pub available_markets: Option<Vec<String>>,
    pub disc_number: u32,
    pub duration_ms: u64,
    pub explicit: bool,
    pub external_ids: Option<HashMap<String, String>>,
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub is_local: bool,
    pub is_playable: Option<bool>,
    pub name: String,
    pub popularity: Option<u32>,
    pub preview_url: Option<String>,
    pub track_number: u32,
    #[serde(rename = "type")]
    pub object_type: String,
    pub uri: String,
}

impl Track {
    /// Names of the hydrated artists, in upstream order
    pub fn artist_names(&self) -> Vec<&str> {
        self.artists
            .as_present()
            .map(|artists| artists.iter().map(|a| a.name.as_str()).collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let artists = self.artist_names();
        if artists.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} - {}", artists.join(", "), self.name)
        }
    }
}
