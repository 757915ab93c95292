// Recommendations

use serde::Deserialize;

use super::Track;

/// Maximum number of seed values accepted per request
pub const MAX_SEEDS: usize = 5;

/// Recommended tracks (simplified shape) and the seeds they came from
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub tracks: Vec<Track>,
    pub seeds: Vec<RecommendationSeed>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSeed {
    pub after_filtering_size: u32,
    pub after_relinking_size: u32,
    pub href: Option<String>,
    pub id: String,
    pub initial_pool_size: u32,
    #[serde(rename = "type")]
    pub seed_type: String,
}

/// Seed values for a recommendations request.
///
/// Between 1 and 5 values in total, in any combination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationSeeds {
    pub artists: Vec<String>,
    pub genres: Vec<String>,
    pub tracks: Vec<String>,
}

impl RecommendationSeeds {
    pub fn len(&self) -> usize {
        self.artists.len() + self.genres.len() + self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-empty seed lists as comma-joined query parameters
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        [
            ("seed_artists", &self.artists),
            ("seed_genres", &self.genres),
            ("seed_tracks", &self.tracks),
        ]
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(name, values)| (name, values.join(",")))
        .collect()
    }
}
