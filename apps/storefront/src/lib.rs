//! # ShopSmart Storefront Library
//!
//! The storefront's cart service and the `shopsmart` command line built on
//! top of it.
//!
//! ## Module Organization
//! ```text
//! shopsmart_storefront/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── notify.rs       ◄─── Notification type and sinks
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── CartStore service
//! │   ├── provider.rs ◄─── CartProvider (initialized once)
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   └── cart.rs     ◄─── Cart commands
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Embedding
//! ```rust,ignore
//! let provider = CartProvider::new();
//! provider
//!     .initialize(Arc::new(store), Arc::new(notifier), ConfigState::from_env().cart_options())
//!     .await;
//!
//! let response = commands::cart::add_to_cart(&provider, product, Some(2)).await?;
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod notify;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shopsmart_core::validation::validate_storage_key;
use shopsmart_store::{SqliteStore, StoreConfig};

use cli::{CartCommand, Cli};
use commands::cart::{self as cart_commands, CartResponse};
use error::{ApiError, ErrorCode};
use notify::TracingNotifier;
use state::{CartProvider, ConfigState};

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Invocation                                        │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • SHOPSMART_* environment variables over defaults                   │
/// │                                                                         │
/// │  2. Determine Store Path ─────────────────────────────────────────────► │
/// │     • --store / SHOPSMART_STORE_PATH                                    │
/// │     • otherwise the platform data directory                             │
/// │                                                                         │
/// │  3. Open Durable Store ───────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │                                                                         │
/// │  4. Initialize Provider ──────────────────────────────────────────────► │
/// │     • Hydrates the saved cart                                           │
/// │                                                                         │
/// │  5. Execute Command, Close Store ─────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<CartResponse, ApiError> {
    let config = ConfigState::from_env();
    validate_storage_key(&config.cart_key)?;

    let db_path = match cli.store.or_else(|| config.store_path.clone()) {
        Some(path) => path,
        None => default_store_path()?,
    };
    info!(?db_path, "Store path determined");

    let store = SqliteStore::open(StoreConfig::new(db_path)).await?;

    let provider = CartProvider::new();
    provider
        .initialize(
            Arc::new(store.clone()),
            Arc::new(TracingNotifier),
            config.cart_options(),
        )
        .await;

    let result = execute(&provider, cli.command).await;

    store.close().await;
    result
}

/// Applies one CLI command to an initialized provider.
pub async fn execute(
    provider: &CartProvider,
    command: CartCommand,
) -> Result<CartResponse, ApiError> {
    match command {
        CartCommand::Show => cart_commands::get_cart(provider),
        CartCommand::Add(args) => {
            cart_commands::add_to_cart(provider, args.product(), Some(args.quantity)).await
        }
        CartCommand::Remove { id } => cart_commands::remove_from_cart(provider, id).await,
        CartCommand::Set { id, quantity } => {
            cart_commands::update_cart_item(provider, id, quantity).await
        }
        CartCommand::Clear => cart_commands::clear_cart(provider).await,
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries the JSON result.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopsmart=trace` - Show trace for shopsmart crates only
/// - Default: INFO, DEBUG for shopsmart crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shopsmart=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the cart database path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.shopsmart.storefront/shopsmart.db`
/// - **Windows**: `%APPDATA%\shopsmart\storefront\data\shopsmart.db`
/// - **Linux**: `~/.local/share/storefront/shopsmart.db`
pub fn default_store_path() -> Result<PathBuf, ApiError> {
    let proj_dirs = ProjectDirs::from("com", "shopsmart", "storefront").ok_or_else(|| {
        ApiError::new(
            ErrorCode::StorageError,
            "Could not determine app data directory",
        )
    })?;

    let data_dir = proj_dirs.data_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(data_dir).map_err(|e| {
        ApiError::new(
            ErrorCode::StorageError,
            format!("Could not create {}: {}", data_dir.display(), e),
        )
    })?;

    Ok(data_dir.join("shopsmart.db"))
}
