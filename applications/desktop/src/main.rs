/// Soundpad - playlist soundboard with per-playlist hotkeys
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use soundpad::{commands, AppConfig, Soundpad};
use soundpad_core::{PlaylistId, SoundpadError, TrackId};
use soundpad_hotkeys::KeyDescriptor;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "soundpad")]
#[command(about = "Playlist soundboard with per-playlist hotkeys", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SOUNDPAD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan volumes for audio files
    Scan {
        /// Stop after roughly this many results
        #[arg(long)]
        max_results: Option<usize>,
        /// Scan these roots instead of every volume
        #[arg(long = "root")]
        roots: Vec<PathBuf>,
    },
    /// List playlists
    Playlists,
    /// Create a playlist
    CreatePlaylist {
        name: String,
    },
    /// Add files or folders to a playlist
    Import {
        playlist: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Bind a key to a track
    Bind {
        playlist: String,
        track: String,
        /// Key such as `F5` or `Ctrl+Shift+A`
        key: String,
        /// Take the key from the track that holds it
        #[arg(long)]
        force: bool,
    },
    /// Remove the key of a track
    Unbind {
        playlist: String,
        track: String,
    },
    /// Show the bindings of a playlist
    Hotkeys {
        playlist: String,
    },
    /// Remove every binding in every playlist
    ResetHotkeys {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Commands::Scan { max_results, roots } = &cli.command {
        if let Some(max) = max_results {
            config.scan.max_results = *max;
        }
        if !roots.is_empty() {
            config.scan.roots.clone_from(roots);
        }
        config.validate()?;
    }

    let mut app = Soundpad::open(config).await?;
    run(&mut app, cli.command).await
}

async fn run(app: &mut Soundpad, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Scan { .. } => {
            let results = commands::scan_all_audio_files(app).await;
            for result in &results {
                println!("{}\t{}", result.size_bytes, result.path.display());
            }
            println!("Found {} files", results.len());
        }
        Commands::Playlists => {
            println!("Playlists:");
            for playlist in app.playlists() {
                println!(
                    "  {} - {} ({} tracks)",
                    playlist.id,
                    playlist.name,
                    playlist.len()
                );
            }
        }
        Commands::CreatePlaylist { name } => {
            let playlist = app.create_playlist(&name).await?;
            println!("Created {} ({})", playlist.name, playlist.id);
        }
        Commands::Import { playlist, paths } => {
            let playlist = PlaylistId::new(playlist);
            let mut added = 0;
            for path in paths {
                let tracks = if path.is_dir() {
                    app.import_folder(&playlist, &path).await?
                } else {
                    app.add_files(&playlist, &[path]).await?
                };
                added += tracks.len();
            }
            println!("Added {added} tracks");
        }
        Commands::Bind {
            playlist,
            track,
            key,
            force,
        } => {
            let key: KeyDescriptor = key.parse()?;
            let playlist = PlaylistId::new(playlist);
            let track = TrackId::new(track);
            match app.bind_hotkey(&playlist, &track, key.clone(), force).await {
                Ok(binding) => {
                    println!("Bound {key} to {track}");
                    if let Some(displaced) = binding.displaced_track {
                        println!("  (taken from {displaced})");
                    }
                }
                Err(SoundpadError::Conflict {
                    existing_track_id, ..
                }) => bail!("{key} is already bound to {existing_track_id}; pass --force to reassign"),
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Unbind { playlist, track } => {
            let removed = app
                .unbind_hotkey(&PlaylistId::new(playlist), &TrackId::new(track))
                .await?;
            match removed {
                Some(key) => println!("Removed {key}"),
                None => println!("Track had no hotkey"),
            }
        }
        Commands::Hotkeys { playlist } => {
            let playlist = PlaylistId::new(playlist);
            let entries = app.playlist(&playlist).context("Playlist not found")?;
            println!("Hotkeys for {}:", entries.name);
            for (key, track_id) in app.hotkeys().bindings(&playlist) {
                let title = entries
                    .track(track_id)
                    .map_or("<missing>", |t| t.title.as_str());
                println!("  {:<16} {title} ({track_id})", key.to_string());
            }
        }
        Commands::ResetHotkeys { yes } => {
            if !yes {
                bail!("Refusing to reset hotkeys without --yes");
            }
            app.reset_hotkeys().await?;
            println!("All hotkeys removed");
        }
    }

    Ok(())
}
