/// Smart Player - headless player and mini-player bridge
use clap::{Parser, Subcommand};
use smart_player::{commands, library, CliConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "smart-player")]
#[command(about = "Smart Player queue, selection and mini-player tools", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SMART_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a library through the smart queue on a simulated engine
    Simulate {
        /// Library export (JSON)
        #[arg(short, long)]
        library: Option<PathBuf>,
        /// Number of songs to play
        #[arg(short, long, default_value_t = 20)]
        steps: usize,
        /// Seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show smart-queue weights of every candidate
    Weights {
        /// Library export (JSON)
        #[arg(short, long)]
        library: Option<PathBuf>,
        /// ID of the playing song (default: first song)
        #[arg(long)]
        current: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve a mini player over stdin/stdout
    Sync {
        /// Library export (JSON)
        #[arg(short, long)]
        library: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output and sync traffic
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smart_player=info,smart_playback=info,smart_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate {
            library,
            steps,
            seed,
            json,
        } => {
            let songs = library::load_library(&config.library_path(library)?)?;
            let report = commands::simulate(&config, songs, steps, seed).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_simulation(&report);
            }
        }
        Commands::Weights {
            library,
            current,
            json,
        } => {
            let songs = library::load_library(&config.library_path(library)?)?;
            let report =
                commands::weights(&config, &songs, current.as_deref(), chrono::Utc::now())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_weights(&report);
            }
        }
        Commands::Sync { library } => {
            let songs = library::load_library(&config.library_path(library)?)?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            commands::sync(&config, songs, input, tokio::io::stdout()).await?;
        }
    }

    Ok(())
}

fn print_simulation(report: &commands::SimulationReport) {
    for step in &report.steps {
        let index = step
            .queue_index
            .map_or_else(|| "-".to_string(), |i| i.to_string());
        println!(
            "{:>4}  [{:>3}]  {} - {}",
            step.step, index, step.artist, step.title
        );
    }

    println!();
    println!("Play counts:");
    for (id, count) in &report.play_counts {
        println!("{count:>6}  {id}");
    }
}

fn print_weights(report: &commands::WeightReport) {
    println!("Current: {}", report.current);
    println!(
        "{:>8}  {:>7}  {:>6}  {:>6}  {:>6}  {:>6}  {:>6}  {:>6}  {:>7}  {:>6}  song",
        "share", "weight", "fav", "plays", "genre", "artist", "album", "energy", "recency", "fresh"
    );
    for c in &report.candidates {
        let b = &c.breakdown;
        println!(
            "{:>7.1}%  {:>7.2}  {:>6.2}  {:>6.2}  {:>6.2}  {:>6.2}  {:>6.2}  {:>6.2}  {:>7.2}  {:>6.2}  {} - {}",
            c.share * 100.0,
            b.weight,
            b.favorite,
            b.play_count,
            b.genre,
            b.artist,
            b.album,
            b.energy,
            b.recency,
            b.freshness + b.never_played,
            c.artist,
            c.title
        );
    }
}
