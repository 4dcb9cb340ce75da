use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use ytmusic::YtMusicApi;

#[derive(Parser)]
#[command(name = "ytmusic-cli")]
#[command(about = "CLI for the ytmusic library client", long_about = None)]
struct Cli {
    /// Browser session cookies (can also be set via YTMUSIC_COOKIES env var)
    #[arg(long, env = "YTMUSIC_COOKIES")]
    cookies: Option<String>,

    /// Geographical location code sent with every request
    #[arg(short, long, default_value = "US")]
    location: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a library surface
    Library {
        /// Which surface to list
        #[arg(value_enum)]
        surface: Surface,
    },
    /// List the episodes of a podcast
    Episodes {
        /// Browse id of the podcast
        podcast_id: String,
    },
    /// Show the media streams of a video
    Streams {
        /// Video id
        video_id: String,
    },
    /// Download the best audio stream of a video
    Download {
        /// Video id
        video_id: String,

        /// Output file
        #[arg(short, long, default_value = "audio.m4a")]
        output: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum Surface {
    Songs,
    Albums,
    Artists,
    Subscriptions,
    Playlists,
    Podcasts,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let api = match &cli.cookies {
        Some(cookies) => YtMusicApi::with_cookies(&cli.location, cookies)?,
        None => YtMusicApi::new(&cli.location)?,
    };

    match &cli.command {
        Commands::Library { surface } => match surface {
            Surface::Songs => {
                for (i, song) in api.get_library_songs().await?.iter().enumerate() {
                    println!(
                        "{}. {} - {} ({}s)",
                        i + 1,
                        song.artists_string(", "),
                        song.name,
                        song.duration.as_secs()
                    );
                }
            }
            Surface::Albums => {
                for (i, album) in api.get_library_albums().await?.iter().enumerate() {
                    println!(
                        "{}. {} - {} ({})",
                        i + 1,
                        album.artists_string(", "),
                        album.name,
                        album.release_year
                    );
                }
            }
            Surface::Artists => {
                for (i, artist) in api.get_library_artists().await?.iter().enumerate() {
                    println!("{}. {} ({} songs)", i + 1, artist.name, artist.song_count);
                }
            }
            Surface::Subscriptions => {
                for (i, sub) in api.get_library_subscriptions().await?.iter().enumerate() {
                    println!("{}. {} ({})", i + 1, sub.name, sub.subscribers_info);
                }
            }
            Surface::Playlists => {
                for (i, playlist) in api.get_library_playlists().await?.iter().enumerate() {
                    println!(
                        "{}. {} by {} ({} songs)",
                        i + 1,
                        playlist.name,
                        playlist.creator.name,
                        playlist.song_count
                    );
                }
            }
            Surface::Podcasts => {
                for (i, podcast) in api.get_library_podcasts().await?.iter().enumerate() {
                    println!("{}. {} by {}", i + 1, podcast.name, podcast.host.name);
                }
            }
        },
        Commands::Episodes { podcast_id } => {
            for (i, episode) in api.get_podcast_episodes(podcast_id).await?.iter().enumerate() {
                println!(
                    "{}. {} ({})",
                    i + 1,
                    episode.name,
                    episode.released_at.format("%Y-%m-%d")
                );
            }
        }
        Commands::Streams { video_id } => {
            for stream in api.get_streaming_data(video_id).await? {
                match stream {
                    ytmusic::MediaStream::Audio(audio) => println!(
                        "audio itag {} {} {}bps {}Hz",
                        audio.itag, audio.container.codecs, audio.bitrate, audio.sample_rate
                    ),
                    ytmusic::MediaStream::Video(video) => println!(
                        "video itag {} {} {}bps {}",
                        video.itag, video.container.codecs, video.bitrate, video.quality_label
                    ),
                }
            }
        }
        Commands::Download { video_id, output } => {
            let streams = api.get_streaming_data(video_id).await?;
            let best = streams
                .iter()
                .filter(|s| s.is_audio())
                .max_by_key(|s| s.bitrate())
                .ok_or("no audio streams available")?;

            println!("Downloading audio stream to {}...", output.display());
            api.download_stream(best.url(), output).await?;
            println!("✅ Saved: {}", output.display());
        }
    }

    Ok(())
}
