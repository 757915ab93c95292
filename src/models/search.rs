// Paginated results and search

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::Entity;

/// One page of a paginated collection
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    pub href: String,
    pub items: Vec<T>,
    pub limit: u32,
    pub next: Option<String>,
    pub offset: u32,
    pub previous: Option<String>,
    pub total: u32,
}

impl<T> Page<T> {
    /// Same pagination metadata around a different item list
    pub fn with_items<U>(self, items: Vec<U>) -> Page<U> {
        Page {
            href: self.href,
            items,
            limit: self.limit,
            next: self.next,
            offset: self.offset,
            previous: self.previous,
            total: self.total,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// A search result page. Items are homogeneous; their kind follows the
/// requested search type, not the payload.
pub type Search = Page<Entity>;

/// Resource types accepted by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchType {
    Track,
    Album,
    Artist,
}

impl SearchType {
    /// Value of the `type` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            SearchType::Track => "track",
            SearchType::Album => "album",
            SearchType::Artist => "artist",
        }
    }

    /// Distinct types in first-seen order
    pub fn dedup(types: &[SearchType]) -> Vec<SearchType> {
        let mut distinct = Vec::with_capacity(types.len());
        for search_type in types {
            if !distinct.contains(search_type) {
                distinct.push(*search_type);
            }
        }
        distinct
    }

    /// Item kind used to hydrate the page and key of the page in the response
    pub fn item_kind(&self) -> &'static str {
        match self {
            SearchType::Track => "tracks",
            SearchType::Album => "albums",
            SearchType::Artist => "artists",
        }
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "track" | "tracks" => Ok(SearchType::Track),
            "album" | "albums" => Ok(SearchType::Album),
            "artist" | "artists" => Ok(SearchType::Artist),
            other => Err(format!("unsupported search type: {}", other)),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}
