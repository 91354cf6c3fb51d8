use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "brewroom", version, about = "Brewroom focus timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run and inspect focus sessions
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Sticker collection
    Collection {
        #[command(subcommand)]
        action: commands::collection::CollectionAction,
    },
    /// Premium sticker entitlement
    Premium {
        #[command(subcommand)]
        action: commands::premium::PremiumAction,
    },
    /// Background music library
    Music {
        #[command(subcommand)]
        action: commands::music::MusicAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BREWROOM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Session { action } => commands::session::run(action),
        Commands::Collection { action } => commands::collection::run(action),
        Commands::Premium { action } => commands::premium::run(action),
        Commands::Music { action } => commands::music::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
