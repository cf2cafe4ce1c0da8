use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use tracing::info;

use castaway::config::Config;
use castaway::db::models::CreateBottleRequest;
use castaway::db::sqlite::SqliteDatabase;
use castaway::db::Database;
use castaway::moderation::{self, ModerationEngine, ModerationGateway};
use castaway::output::terminal;
use castaway::pipeline::create::{create_bottle, CreateOutcome};

/// Castaway: messages in bottles, screened before they're thrown to sea.
///
/// Every bottle's text is checked by a pattern-based moderation engine
/// before it is stored.
#[derive(Parser)]
#[command(name = "castaway", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Analyze a piece of text and show every rule that fires
    Check {
        /// The text to analyze
        text: String,

        /// Override the detection threshold for this run (0.0 - 1.0)
        #[arg(long)]
        threshold: Option<f64>,

        /// Print the full diagnostic trace
        #[arg(long)]
        debug: bool,
    },

    /// List the compiled rule catalog
    Rules,

    /// Create a bottle (moderated)
    Create {
        /// The message
        content: String,

        /// Display name of the sender
        #[arg(long)]
        author: Option<String>,

        /// Where the bottle was thrown from
        #[arg(long)]
        location_from: Option<String>,

        /// Tag to file the bottle under (default tag if omitted)
        #[arg(long)]
        tag_id: Option<i64>,

        /// File under the personal tag
        #[arg(long)]
        personal: bool,

        /// Identity-provider user id of the sender
        #[arg(long)]
        user_id: Option<String>,
    },

    /// List stored bottles
    Bottles {
        /// Only show bottles with this tag
        #[arg(long)]
        tag_id: Option<i64>,

        /// Only show bottles created by this user
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Show system status (DB stats, moderation settings)
    Status,

    /// Run the JSON API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("castaway=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Castaway database...");
            let db = init_database(&config)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext: cargo run -- create \"hello from the shore\"");
        }

        Commands::Check {
            text,
            threshold,
            debug,
        } => {
            let engine = moderation::build_engine(&config.moderation)?;
            if let Some(t) = threshold {
                if !(0.0..=1.0).contains(&t) {
                    println!(
                        "{}",
                        format!("Ignoring --threshold {t}: must be between 0 and 1").yellow()
                    );
                }
                engine.set_threshold(t);
            }
            if debug {
                engine.set_debug_mode(true);
            }

            let result = engine.analyze(&text);
            terminal::display_analysis(&text, &result);
        }

        Commands::Rules => {
            let engine = moderation::build_engine(&config.moderation)?;
            terminal::display_rules(engine.catalog());
        }

        Commands::Create {
            content,
            author,
            location_from,
            tag_id,
            personal,
            user_id,
        } => {
            let db = open_database(&config)?;
            let gateway = build_gateway(&config)?;

            let req = CreateBottleRequest {
                content,
                author,
                location_from,
                tag_id,
                user_id,
                personal: personal.then_some(true),
            };

            match create_bottle(&gateway, db.as_ref(), req).await? {
                CreateOutcome::Created(bottle) => {
                    println!(
                        "{} bottle #{} (tag {})",
                        "Tossed".green().bold(),
                        bottle.id,
                        bottle.tag_id
                    );
                }
                CreateOutcome::Blocked(rejection) => {
                    terminal::display_rejection(&rejection);
                }
            }
        }

        Commands::Bottles { tag_id, user_id } => {
            let db = open_database(&config)?;
            let bottles = db.get_bottles(tag_id, user_id.as_deref()).await?;
            terminal::display_bottles(&bottles);
        }

        Commands::Status => {
            if !castaway::status::database_exists(&config.db_path) {
                println!("Database: not initialized");
                println!("\nRun `castaway init` to set up the database.");
                return Ok(());
            }
            let db = open_database(&config)?;
            let engine = moderation::build_engine(&config.moderation)?;
            castaway::status::show(&db, &config.db_path, &engine).await?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let db = init_database(&config)?;
            let gateway = build_gateway(&config)?;
            castaway::web::run_server(db, gateway, port, &bind).await?;
        }
    }

    Ok(())
}

/// Compile the rule catalog and wrap the engine in a gateway.
///
/// The engine is built once here and shared by handle; nothing else
/// constructs one.
fn build_gateway(config: &Config) -> Result<ModerationGateway> {
    let engine: ModerationEngine = moderation::build_engine(&config.moderation)?;
    Ok(ModerationGateway::new(Arc::new(engine)))
}

/// Open the existing SQLite database.
fn open_database(config: &Config) -> Result<Arc<dyn Database>> {
    let conn = castaway::db::open(&config.db_path)?;
    Ok(Arc::new(SqliteDatabase::new(conn)))
}

/// Initialize the database (create if needed).
fn init_database(config: &Config) -> Result<Arc<dyn Database>> {
    let conn = castaway::db::initialize(&config.db_path)?;
    Ok(Arc::new(SqliteDatabase::new(conn)))
}
