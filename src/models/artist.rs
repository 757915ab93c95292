// Artist entity

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

use super::{Field, Image};

/// A catalog artist.
///
/// The simplified shape has no `followers`, `genres`, `images` or
/// `popularity`; those stay `Missing` / `None` rather than empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub external_urls: HashMap<String, String>,
    #[serde(default)]
    pub followers: Field<Followers>,
    pub genres: Option<Vec<String>>,
    pub href: String,
    pub id: String,
    #[serde(default)]
    pub images: Field<Vec<Image>>,
    pub name: String,
    pub popularity: Option<u32>,
    #[serde(rename = "type")]
    pub object_type: String,
    pub uri: String,
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Followers {
    pub href: Option<String>,
    pub total: u64,
}

impl fmt::Display for Followers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.total)
    }
}
