use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::sync::Arc;

use substore::config::Config;
use substore::crypto::hash_secret;
use substore::db::{AppState, create_pool, init_db, queries};
use substore::handlers;
use substore::models::{CreateProduct, CustomOption};
use substore::rate_limit::LoginRateLimiter;
use substore::session::SessionStore;

#[derive(Parser, Debug)]
#[command(name = "substore")]
#[command(about = "Subscription reselling storefront backend")]
struct Cli {
    /// Seed the database with a demo catalog (dev mode only)
    #[arg(long)]
    seed: bool,

    /// Delete the database on exit (dev mode only, useful for fresh starts)
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash an admin password for use as ADMIN_PASSWORD_HASH
    HashPassword {
        password: String,
    },
}

/// Seeds the catalog with demo products for local storefront work.
/// Only runs in dev mode and when the catalog is empty.
fn seed_demo_catalog(state: &AppState) {
    let conn = state.db.get().expect("Failed to get db connection for seeding");

    let count = queries::count_products(&conn).expect("Failed to count products");
    if count > 0 {
        tracing::info!("Catalog already has products, skipping seed");
        return;
    }

    let streaming = CreateProduct {
        category: "Subscriptions".to_string(),
        name: "StreamMax Premium".to_string(),
        image: "https://images.example.com/streammax.png".to_string(),
        description: "4K Ultra HD streaming\nWatch on 4 screens\nAd-free catalog".to_string(),
        price_1_month_actual: 499,
        price_1_month_selling: 299,
        in_stock_1_month: true,
        price_3_month_actual: 1497,
        price_3_month_selling: 849,
        in_stock_3_month: true,
        price_6_month_actual: 2994,
        price_6_month_selling: 1599,
        in_stock_6_month: false,
        price_12_month_actual: 5988,
        price_12_month_selling: 2999,
        in_stock_12_month: true,
        custom_options: vec![CustomOption {
            id: String::new(),
            label: "Family (1 Year)".to_string(),
            actual_price: 7999,
            selling_price: 4499,
            in_stock: true,
        }],
    };
    let product = queries::create_product(&conn, &streaming).expect("Failed to seed product");
    tracing::info!("Seeded product: {} (id: {})", product.name, product.id);

    let music = CreateProduct {
        category: "Music".to_string(),
        name: "TuneBox Individual".to_string(),
        image: "https://images.example.com/tunebox.png".to_string(),
        description: "Offline playback\nLossless audio\nNo ads between tracks".to_string(),
        price_1_month_actual: 199,
        price_1_month_selling: 129,
        in_stock_1_month: true,
        price_3_month_actual: 0,
        price_3_month_selling: 0,
        in_stock_3_month: false,
        price_6_month_actual: 1194,
        price_6_month_selling: 649,
        in_stock_6_month: true,
        price_12_month_actual: 2388,
        price_12_month_selling: 1199,
        in_stock_12_month: true,
        custom_options: Vec::new(),
    };
    let product = queries::create_product(&conn, &music).expect("Failed to seed product");
    tracing::info!("Seeded product: {} (id: {})", product.name, product.id);

    tracing::info!("Demo catalog seeded");
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Utility command, runs without server startup
    if let Some(Command::HashPassword { password }) = cli.command {
        println!("{}", hash_secret(&password));
        println!();
        println!("Set this as ADMIN_PASSWORD_HASH in the environment.");
        return;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "substore=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    if config.dev_mode {
        tracing::info!("Running in DEVELOPMENT mode");
    }

    // Create database connection pool and initialize the schema
    let db_pool = create_pool(&config.database_path).expect("Failed to create database pool");
    {
        let conn = db_pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize database");
    }

    let state = AppState {
        db: db_pool,
        sessions: Arc::new(SessionStore::new(config.session_ttl_secs)),
        login_limiter: Arc::new(LoginRateLimiter::default()),
        admin_password_hash: config.admin_password_hash.clone(),
    };

    // Seed demo catalog if --seed flag is passed (only in dev mode)
    if cli.seed {
        if !config.dev_mode {
            tracing::warn!("--seed flag ignored: not in dev mode (set SUBSTORE_ENV=dev)");
        } else {
            seed_demo_catalog(&state);
        }
    }

    // Build the application router
    let app = handlers::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    // Track if we should clean up on exit
    let cleanup_on_exit = cli.ephemeral && config.dev_mode;
    let db_path = config.database_path.clone();

    if cleanup_on_exit {
        tracing::info!("EPHEMERAL MODE: database will be deleted on exit");
    }

    tracing::info!("Substore server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    // Cleanup on exit if ephemeral mode
    if cleanup_on_exit {
        tracing::info!("Cleaning up ephemeral database...");
        if let Err(e) = std::fs::remove_file(&db_path) {
            tracing::warn!("Failed to remove {}: {}", db_path, e);
        } else {
            tracing::info!("Removed {}", db_path);
        }
        // Also remove WAL and SHM files if they exist
        let _ = std::fs::remove_file(format!("{}-wal", db_path));
        let _ = std::fs::remove_file(format!("{}-shm", db_path));
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
