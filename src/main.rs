use anyhow::{Context, Result};

use catalog_client::config::{Command, Config};
use catalog_client::models::{RecommendationSeeds, SearchType};
use catalog_client::CatalogClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (for log level)
    let config = Config::load()?;
    config.validate()?;

    // Initialize logging with a configured level
    let log_level = config.log_level.to_lowercase();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Command: {:?}", config.command);

    let client = CatalogClient::new(config.client.clone()).context("Invalid client configuration")?;

    let token = client.get_token().await.context("Authentication failed")?;
    tracing::info!(
        "Authentication successful (token: {}...)",
        token.chars().take(8).collect::<String>()
    );

    run(&client, config.command).await
}

async fn run(client: &CatalogClient, command: Command) -> Result<()> {
    match command {
        Command::Track { id } => {
            let track = client.get_track(&id).await.context("Track lookup failed")?;
            println!("{}", track);
            if let Some(album) = track.album.as_present() {
                println!("  album: {}", album);
            }
        }

        Command::Album { id } => {
            let album = client.get_album(&id).await.context("Album lookup failed")?;
            println!("{} ({})", album, album.release_date);
            if let Some(page) = album.tracks.as_present() {
                for track in &page.items {
                    println!("  {:>2}. {}", track.track_number, track);
                }
            }
        }

        Command::AlbumTracks { id, market, limit } => {
            let tracks = client
                .get_album_tracks(&id, &market, limit)
                .await
                .context("Album tracks lookup failed")?;
            print_list(&tracks);
        }

        Command::Artist { id } => {
            let artist = client.get_artist(&id).await.context("Artist lookup failed")?;
            println!("{}", artist);
            if let Some(followers) = artist.followers.as_present() {
                println!("  followers: {}", followers);
            }
            if let Some(genres) = &artist.genres {
                println!("  genres: {}", genres.join(", "));
            }
        }

        Command::ArtistAlbums {
            id,
            include_groups,
            limit,
        } => {
            let albums = client
                .get_artist_albums(&id, &include_groups, limit)
                .await
                .context("Artist albums lookup failed")?;
            print_list(&albums);
        }

        Command::TopTracks { id, market } => {
            let tracks = client
                .get_artist_top_tracks(&id, &market)
                .await
                .context("Top tracks lookup failed")?;
            print_list(&tracks);
        }

        Command::Related { id } => {
            let artists = client
                .get_related_artists(&id)
                .await
                .context("Related artists lookup failed")?;
            print_list(&artists);
        }

        Command::Analysis { id } => {
            let analysis = client
                .get_audio_analysis(&id)
                .await
                .context("Audio analysis lookup failed")?;
            let tonality = analysis.tonality();
            println!("tempo: {:.1} BPM", analysis.tempo);
            println!("loudness: {:.1} dB", analysis.loudness);
            println!(
                "key: {} (confidence {:.2})",
                tonality,
                tonality.confidence()
            );
        }

        Command::NewReleases { country, limit } => {
            let albums = client
                .get_new_releases(country.as_deref(), limit)
                .await
                .context("New releases lookup failed")?;
            print_list(&albums);
        }

        Command::Genres => {
            let genres = client
                .available_genre_seeds()
                .await
                .context("Genre seeds lookup failed")?;
            for genre in genres {
                println!("{}", genre);
            }
        }

        Command::Recommend {
            artists,
            genres,
            tracks,
            limit,
        } => {
            let seeds = RecommendationSeeds {
                artists,
                genres,
                tracks,
            };
            let recommendations = client
                .get_recommendations(limit, &seeds)
                .await
                .context("Recommendations lookup failed")?;
            print_list(&recommendations.tracks);
        }

        Command::Search {
            query,
            types,
            limit,
        } => {
            let pages = client
                .search(&query, &types, limit)
                .await
                .context("Search failed")?;
            for (search_type, page) in SearchType::dedup(&types).iter().zip(&pages) {
                println!("{} ({} of {})", search_type, page.items.len(), page.total);
                for item in &page.items {
                    println!("  {}", item);
                }
            }
        }
    }

    Ok(())
}

fn print_list<T: std::fmt::Display>(items: &[T]) {
    for (i, item) in items.iter().enumerate() {
        println!("{:>3}. {}", i + 1, item);
    }
}
