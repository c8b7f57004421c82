use std::path::PathBuf;

use clap::{Parser, Subcommand};

use bookstore_rs::config::{ConfigLoader, LoggerSettings};
use bookstore_rs::db::run_pending_migrations;
use bookstore_rs::server::Server;

/// A bookstore REST API with database integration
#[derive(Parser, Debug)]
#[command(name = "bookstore-rs")]
#[command(about = "A bookstore REST API: genres, books, users and order transactions")]
#[command(version)]
struct Cli {
    /// Subcommand to execute (defaults to serve)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    ///
    /// Loads a single TOML file instead of the layered config/ directory.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

fn init_tracing(settings: &LoggerSettings) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.level));

    if settings.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new()?;
    if let Some(path) = cli.config {
        loader = loader.with_config_file(path);
    }
    let settings = loader.load()?;

    init_tracing(&settings.logger);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => Server::new(settings).run().await,
        Commands::Migrate => {
            settings.database.validate()?;
            let applied = run_pending_migrations(settings.database.url.clone()).await?;
            if applied.is_empty() {
                tracing::info!("No migrations to apply - database is already up to date");
            } else {
                for migration in &applied {
                    tracing::info!(migration = %migration, "Applied migration");
                }
                tracing::info!(count = applied.len(), "Database migration completed");
            }
            Ok(())
        }
    }
}
