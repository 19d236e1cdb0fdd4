//! Sparkle CLI — the main entry point.
//!
//! Commands:
//! - `onboard`     — Initialize the config file
//! - `chat`        — Start an interactive tutoring session
//! - `curriculum`  — Show the lesson tables

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "sparkle",
    about = "Professor Sparkle — an age-adaptive coding tutor for children",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the configuration file
    Onboard,

    /// Start an interactive tutoring session
    Chat {
        /// The learner's name
        #[arg(short, long, default_value = "Friend")]
        name: String,

        /// The learner's age; picks the tier and curriculum
        #[arg(short, long)]
        age: i32,

        /// Start at a specific lesson instead of the tier's first
        #[arg(short, long)]
        lesson: Option<String>,
    },

    /// Show the curriculum for every tier
    Curriculum,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { name, age, lesson } => commands::chat::run(name, age, lesson).await?,
        Commands::Curriculum => commands::curriculum::run().await?,
    }

    Ok(())
}
