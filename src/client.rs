// Catalog client
// Resource lookups: fetch, then hydrate with an explicit item kind

use serde_json::Value;
use std::sync::Arc;

use crate::auth::{CredentialManager, Credentials};
use crate::config::ClientConfig;
use crate::error::{CatalogError, Result};
use crate::http_client::{build_client, CatalogHttpClient};
use crate::hydrate::{hydrate_many, hydrate_one, hydrate_page};
use crate::models::{
    Album, Artist, AudioAnalysis, Entity, Field, RecommendationSeeds, Recommendations, Search,
    SearchType, Track, MAX_SEEDS,
};

/// Largest page size accepted by list endpoints
pub const MAX_LIMIT: u32 = 50;

/// Largest number of tracks a recommendations request may ask for
pub const MAX_RECOMMENDATIONS: u32 = 100;

/// Album groups accepted by the artist albums endpoint
pub const ALBUM_GROUPS: [&str; 4] = ["album", "single", "appears_on", "compilation"];

/// Client of the music catalog API.
///
/// Owns one credential manager; every lookup goes through the same cached
/// token. Instances share nothing with each other.
pub struct CatalogClient {
    auth_manager: Arc<CredentialManager>,
    http_client: CatalogHttpClient,
}

impl CatalogClient {
    /// Validate credentials and build the client. No network traffic.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let credentials = Credentials::new(config.client_id, config.client_secret)?;
        let client = build_client(config.connect_timeout, config.request_timeout)?;

        let auth_manager = Arc::new(CredentialManager::new(
            client.clone(),
            credentials,
            config.token_url,
        ));
        let http_client = CatalogHttpClient::new(
            client,
            Arc::clone(&auth_manager),
            &config.api_url,
            &config.api_version,
        );

        tracing::debug!(
            api_root = http_client.api_root(),
            token_url = auth_manager.token_url(),
            "Catalog client created"
        );

        Ok(Self {
            auth_manager,
            http_client,
        })
    }

    /// Request a new access token, replacing the cached one
    pub async fn authenticate(&self) -> Result<()> {
        self.auth_manager.authenticate().await
    }

    /// Currently valid access token, refreshed if needed
    pub async fn get_token(&self) -> Result<String> {
        self.auth_manager.get_token().await
    }

    pub async fn is_token_valid(&self) -> bool {
        self.auth_manager.is_token_valid().await
    }

    /// Raw JSON of an endpoint, not hydrated
    pub async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value> {
        self.http_client.fetch(endpoint, params).await
    }

    // ==================================================================================================
    // Tracks
    // ==================================================================================================

    pub async fn get_track(&self, id: &str) -> Result<Track> {
        let endpoint = format!("tracks/{}", require_id(id)?);
        let json = self.fetch(&endpoint, &[]).await?;
        hydrate_one("tracks", json)
    }

    /// Track-level audio analysis of a track
    pub async fn get_audio_analysis(&self, id: &str) -> Result<AudioAnalysis> {
        let endpoint = format!("audio-analysis/{}", require_id(id)?);
        let mut json = self.fetch(&endpoint, &[]).await?;
        let track = take_key(&endpoint, &mut json, "track")?;
        Ok(serde_json::from_value(track)?)
    }

    // ==================================================================================================
    // Albums
    // ==================================================================================================

    /// Full album; its first page of tracks is hydrated into `Album::tracks`
    pub async fn get_album(&self, id: &str) -> Result<Album> {
        let endpoint = format!("albums/{}", require_id(id)?);
        let json = self.fetch(&endpoint, &[]).await?;
        let mut album: Album = hydrate_one("albums", json)?;

        if let Some(raw) = album.tracks.take_unresolved() {
            album.tracks = match hydrate_page::<Track>("tracks", raw) {
                Ok(page) => Field::Present(page),
                Err(e) => {
                    tracing::debug!(album = %album.id, error = %e, "Album tracks left unresolved");
                    Field::Missing
                }
            };
        }

        Ok(album)
    }

    pub async fn get_album_tracks(&self, id: &str, market: &str, limit: u32) -> Result<Vec<Track>> {
        let endpoint = format!("albums/{}/tracks", require_id(id)?);
        let params = [
            ("market", market.to_string()),
            ("limit", check_limit(limit, MAX_LIMIT)?.to_string()),
        ];

        let mut json = self.fetch(&endpoint, &params).await?;
        let items = take_key(&endpoint, &mut json, "items")?;
        hydrate_many("tracks", items)
    }

    /// New album releases, optionally for one country
    pub async fn get_new_releases(&self, country: Option<&str>, limit: u32) -> Result<Vec<Album>> {
        let endpoint = "browse/new-releases";
        let mut params = vec![("limit", check_limit(limit, MAX_LIMIT)?.to_string())];
        if let Some(country) = country {
            params.push(("country", country.to_string()));
        }

        let mut json = self.fetch(endpoint, &params).await?;
        let mut albums = take_key(endpoint, &mut json, "albums")?;
        let items = take_key(endpoint, &mut albums, "items")?;
        hydrate_many("albums", items)
    }

    // ==================================================================================================
    // Artists
    // ==================================================================================================

    pub async fn get_artist(&self, id: &str) -> Result<Artist> {
        let endpoint = format!("artists/{}", require_id(id)?);
        let json = self.fetch(&endpoint, &[]).await?;
        hydrate_one("artists", json)
    }

    /// Albums of an artist, filtered by album group when `include_groups` is not empty
    pub async fn get_artist_albums(
        &self,
        id: &str,
        include_groups: &[String],
        limit: u32,
    ) -> Result<Vec<Album>> {
        let endpoint = format!("artists/{}/albums", require_id(id)?);

        if let Some(group) = include_groups
            .iter()
            .find(|group| !ALBUM_GROUPS.contains(&group.as_str()))
        {
            return Err(CatalogError::InvalidArgument(format!(
                "unknown album group '{}', expected one of {}",
                group,
                ALBUM_GROUPS.join(", ")
            )));
        }

        let mut params = vec![("limit", check_limit(limit, MAX_LIMIT)?.to_string())];
        if !include_groups.is_empty() {
            params.push(("include_groups", include_groups.join(",")));
        }

        let mut json = self.fetch(&endpoint, &params).await?;
        let items = take_key(&endpoint, &mut json, "items")?;
        hydrate_many("albums", items)
    }

    pub async fn get_artist_top_tracks(&self, id: &str, market: &str) -> Result<Vec<Track>> {
        let endpoint = format!("artists/{}/top-tracks", require_id(id)?);
        let params = [("market", market.to_string())];

        let mut json = self.fetch(&endpoint, &params).await?;
        let tracks = take_key(&endpoint, &mut json, "tracks")?;
        hydrate_many("tracks", tracks)
    }

    pub async fn get_related_artists(&self, id: &str) -> Result<Vec<Artist>> {
        let endpoint = format!("artists/{}/related-artists", require_id(id)?);
        let mut json = self.fetch(&endpoint, &[]).await?;
        let artists = take_key(&endpoint, &mut json, "artists")?;
        hydrate_many("artists", artists)
    }

    // ==================================================================================================
    // Recommendations
    // ==================================================================================================

    /// Recommended tracks for 1 to 5 seeds
    pub async fn get_recommendations(
        &self,
        limit: u32,
        seeds: &RecommendationSeeds,
    ) -> Result<Recommendations> {
        if seeds.is_empty() || seeds.len() > MAX_SEEDS {
            return Err(CatalogError::InvalidArgument(format!(
                "recommendations need between 1 and {} seeds, got {}",
                MAX_SEEDS,
                seeds.len()
            )));
        }

        let endpoint = "recommendations";
        let mut params = vec![("limit", check_limit(limit, MAX_RECOMMENDATIONS)?.to_string())];
        params.extend(seeds.query_params());

        let mut json = self.fetch(endpoint, &params).await?;
        let tracks = take_key(endpoint, &mut json, "tracks")?;
        let seeds = take_key(endpoint, &mut json, "seeds")?;

        Ok(Recommendations {
            tracks: hydrate_many("tracks", tracks)?,
            seeds: serde_json::from_value(seeds)?,
        })
    }

    /// Genres usable as recommendation seeds
    pub async fn available_genre_seeds(&self) -> Result<Vec<String>> {
        let endpoint = "recommendations/available-genre-seeds";
        let mut json = self.fetch(endpoint, &[]).await?;
        let genres = take_key(endpoint, &mut json, "genres")?;
        Ok(serde_json::from_value(genres)?)
    }

    // ==================================================================================================
    // Search
    // ==================================================================================================

    /// Search the catalog; one page per distinct requested type, in the
    /// order of `SearchType::dedup(types)`
    pub async fn search(&self, query: &str, types: &[SearchType], limit: u32) -> Result<Vec<Search>> {
        if query.trim().is_empty() {
            return Err(CatalogError::InvalidArgument(
                "search query must not be empty".to_string(),
            ));
        }

        let requested = SearchType::dedup(types);

        if requested.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "at least one search type is required".to_string(),
            ));
        }

        let endpoint = "search";
        let type_param = requested
            .iter()
            .map(SearchType::as_param)
            .collect::<Vec<_>>()
            .join(",");
        let params = [
            ("q", query.to_string()),
            ("type", type_param),
            ("limit", check_limit(limit, MAX_LIMIT)?.to_string()),
        ];

        let mut json = self.fetch(endpoint, &params).await?;

        requested
            .into_iter()
            .map(|search_type| {
                let item_kind = search_type.item_kind();
                let page = take_key(endpoint, &mut json, item_kind)?;
                hydrate_page::<Entity>(item_kind, page)
            })
            .collect()
    }
}

/// Remove an envelope key from a response body
fn take_key(endpoint: &str, json: &mut Value, key: &str) -> Result<Value> {
    json.as_object_mut()
        .and_then(|object| object.remove(key))
        .ok_or_else(|| CatalogError::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            key: key.to_string(),
        })
}

fn check_limit(limit: u32, max: u32) -> Result<u32> {
    if (1..=max).contains(&limit) {
        Ok(limit)
    } else {
        Err(CatalogError::InvalidArgument(format!(
            "limit must be between 1 and {}, got {}",
            max, limit
        )))
    }
}

/// Trimmed id, safe to use as a single path segment
fn require_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CatalogError::InvalidArgument("id must not be empty".to_string()));
    }
    if let Some(c) = id
        .chars()
        .find(|&c| matches!(c, '/' | '?' | '#' | '%' | '\\') || c.is_whitespace())
    {
        return Err(CatalogError::InvalidArgument(format!(
            "id '{}' contains invalid character {:?}",
            id, c
        )));
    }
    Ok(id)
}
