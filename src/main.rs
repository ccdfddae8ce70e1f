//! Membership API - Application entry point
//!
//! CLI-based entry point that dispatches to the server and migration
//! commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use membership_api::{
    cli::{Cli, Commands, MigrateAction, MigrateArgs, ServeArgs},
    config::Config,
    errors::{AppError, AppResult},
    infra::Database,
    api::{create_router, AppState},
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::from_env();
    tracing::debug!("Configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Serve(args) => serve(args, config).await,
        Commands::Migrate(args) => migrate(args, config).await,
    };

    // Handle errors
    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Start the HTTP server
async fn serve(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Initialize database and run pending migrations
    let db = Database::connect(&config).await;
    tracing::info!("Database connected");

    // Wire handlers against the relational adapters
    let app_state = AppState::from_connection(db.get_connection(), config);

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run a migration action
async fn migrate(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config)
        .await
        .map_err(AppError::from)?;

    match args.action {
        MigrateAction::Up => {
            db.run_migrations().await.map_err(AppError::from)?;
            tracing::info!("Migrations applied");
        }
        MigrateAction::Down => {
            db.rollback_migration().await.map_err(AppError::from)?;
            tracing::info!("Last migration rolled back");
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await.map_err(AppError::from)?;
            tracing::info!("Database reset and migrations re-applied");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await.map_err(AppError::from)? {
                let marker = if applied { "applied" } else { "pending" };
                println!("{marker}  {name}");
            }
        }
    }

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
