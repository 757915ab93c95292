use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::models::SearchType;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_MARKET: &str = "US";
pub const DEFAULT_LIMIT: u32 = 20;

/// Catalog Client - command-line lookups against the music catalog API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// OAuth2 client id
    #[arg(short = 'i', long, env = "CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(short = 's', long, env = "CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Base URL of the catalog API
    #[arg(long, env = "CATALOG_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// API version path segment
    #[arg(long, env = "CATALOG_API_VERSION", default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Token endpoint for the client-credentials grant
    #[arg(long, env = "CATALOG_TOKEN_URL", default_value = DEFAULT_TOKEN_URL)]
    pub token_url: String,

    /// HTTP connect timeout in seconds
    #[arg(long, env = "HTTP_CONNECT_TIMEOUT", default_value = "10")]
    pub connect_timeout: u64,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HTTP_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Catalog lookups
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show a track
    Track { id: String },

    /// Show an album and its tracks
    Album { id: String },

    /// List the tracks of an album
    AlbumTracks {
        id: String,
        #[arg(long, default_value = DEFAULT_MARKET)]
        market: String,
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },

    /// Show an artist
    Artist { id: String },

    /// List the albums of an artist
    ArtistAlbums {
        id: String,
        /// Comma-separated groups: album, single, appears_on, compilation
        #[arg(long, value_delimiter = ',')]
        include_groups: Vec<String>,
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },

    /// Top tracks of an artist in a market
    TopTracks {
        id: String,
        #[arg(long, default_value = DEFAULT_MARKET)]
        market: String,
    },

    /// Artists related to an artist
    Related { id: String },

    /// Audio analysis of a track
    Analysis { id: String },

    /// New album releases
    NewReleases {
        /// ISO 3166-1 alpha-2 country code
        #[arg(long)]
        country: Option<String>,
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },

    /// Genres usable as recommendation seeds
    Genres,

    /// Track recommendations from up to five seeds
    Recommend {
        #[arg(long = "artist")]
        artists: Vec<String>,
        #[arg(long = "genre")]
        genres: Vec<String>,
        #[arg(long = "track")]
        tracks: Vec<String>,
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },

    /// Search the catalog
    Search {
        query: String,
        /// Comma-separated item types: track, album, artist
        #[arg(short, long = "type", value_delimiter = ',', default_value = "track")]
        types: Vec<SearchType>,
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
}

/// Settings of one catalog client instance
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub api_version: String,
    pub token_url: String,
    pub connect_timeout: u64,
    pub request_timeout: u64,
}

impl ClientConfig {
    /// Config with default endpoints and timeouts
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            connect_timeout: 10,
            request_timeout: 30,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub client: ClientConfig,
    pub log_level: String,
    pub command: Command,
}

impl Config {
    /// Load configuration from all sources with priority: CLI > ENV > .env > defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(args: CliArgs) -> Result<Self> {
        let client_id = args
            .client_id
            .context("CLIENT_ID is required (use -i or set CLIENT_ID env var)")?;
        let client_secret = args
            .client_secret
            .context("CLIENT_SECRET is required (use -s or set CLIENT_SECRET env var)")?;

        Ok(Config {
            client: ClientConfig {
                client_id,
                client_secret,
                api_url: args.api_url,
                api_version: args.api_version,
                token_url: args.token_url,
                connect_timeout: args.connect_timeout,
                request_timeout: args.request_timeout,
            },
            log_level: args.log_level,
            command: args.command,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("CATALOG_API_URL", &self.client.api_url),
            ("CATALOG_TOKEN_URL", &self.client.token_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("{} must be an http(s) URL: {}", name, url);
            }
        }

        if self.client.api_version.trim_matches('/').is_empty() {
            anyhow::bail!("CATALOG_API_VERSION must not be empty");
        }

        if self.client.connect_timeout == 0 || self.client.request_timeout == 0 {
            anyhow::bail!("HTTP timeouts must be greater than zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let mut argv = vec!["catalog-client", "-i", "id", "-s", "secret"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::new("id", "secret");
        assert_eq!(config.client_id, "id");
        assert_eq!(config.api_url, "https://api.spotify.com");
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.token_url, "https://accounts.spotify.com/api/token");
        assert_eq!(config.connect_timeout, 10);
        assert_eq!(config.request_timeout, 30);
    }

    #[test]
    fn test_parse_track_command() {
        let config = Config::from_args(parse(&["track", "11dFghVXANMlKmJXsNCbNl"])).unwrap();
        assert_eq!(config.client.client_secret, "secret");
        assert_eq!(
            config.command,
            Command::Track {
                id: "11dFghVXANMlKmJXsNCbNl".to_string()
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_search_types() {
        let args = parse(&["search", "daft punk", "--type", "artist,album", "-l", "5"]);
        assert_eq!(
            args.command,
            Command::Search {
                query: "daft punk".to_string(),
                types: vec![SearchType::Artist, SearchType::Album],
                limit: 5,
            }
        );

        let args = parse(&["search", "daft punk"]);
        assert!(matches!(
            args.command,
            Command::Search { ref types, limit: 20, .. } if types == &vec![SearchType::Track]
        ));
    }

    #[test]
    fn test_parse_invalid_search_type() {
        let result = CliArgs::try_parse_from([
            "catalog-client", "-i", "id", "-s", "secret", "search", "x", "--type", "playlist",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_recommend_seeds() {
        let args = parse(&["recommend", "--artist", "a1", "--genre", "house", "--genre", "techno"]);
        assert_eq!(
            args.command,
            Command::Recommend {
                artists: vec!["a1".to_string()],
                genres: vec!["house".to_string(), "techno".to_string()],
                tracks: vec![],
                limit: 20,
            }
        );
    }

    #[test]
    fn test_parse_kebab_case_commands() {
        assert!(matches!(
            parse(&["album-tracks", "x"]).command,
            Command::AlbumTracks { ref market, limit: 20, .. } if market == "US"
        ));
        assert!(matches!(
            parse(&["artist-albums", "x", "--include-groups", "album,single"]).command,
            Command::ArtistAlbums { ref include_groups, .. } if include_groups.len() == 2
        ));
        assert!(matches!(parse(&["top-tracks", "x"]).command, Command::TopTracks { .. }));
        assert!(matches!(parse(&["new-releases"]).command, Command::NewReleases { country: None, .. }));
        assert_eq!(parse(&["genres"]).command, Command::Genres);
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = Config::from_args(parse(&["genres"])).unwrap();
        config.client.api_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::from_args(parse(&["genres"])).unwrap();
        config.client.token_url = "accounts.example.com/api/token".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeouts() {
        let mut config = Config::from_args(parse(&["genres"])).unwrap();
        config.client.request_timeout = 0;
        assert!(config.validate().is_err());
    }
}
