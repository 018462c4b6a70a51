//! Menuboard Server
//!
//! Serves the public menu page and a storage proxy the admin editor reads
//! from and writes to.
//!
//! # Configuration
//!
//! Environment variables:
//! - `MENUBOARD_PORT`: Port to listen on (default: 8080)
//! - `MENUBOARD_ADMIN_PASSWORD`: Password for the storage proxy (unset: proxy disabled)
//! - `MENUBOARD_MENU_PATH`: Menu document file (default: ~/.local/share/menuboard/menu.json)
//! - `MENUBOARD_CONFIG`: Settings file (default: ~/.config/menuboard/config.yaml)

use menuboard::config::Config as AppConfig;
use menuboard::server::{router, AppState, MenuStorage};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Server configuration
#[derive(Debug, Clone)]
struct Config {
    /// Port to listen on
    port: u16,
    /// Storage proxy password
    admin_password: Option<String>,
    /// Menu document file
    menu_path: PathBuf,
    /// Path to settings file
    config_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let port = std::env::var("MENUBOARD_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let admin_password = std::env::var("MENUBOARD_ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        let menu_path = std::env::var("MENUBOARD_MENU_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("menuboard")
                    .join("menu.json")
            });

        let config_path = std::env::var("MENUBOARD_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| AppConfig::default_config_path());

        Self {
            port,
            admin_password,
            menu_path,
            config_path,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "menuboard=info,menuboard_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(Config::from_env()).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let settings = AppConfig::load(Some(config.config_path.clone()))?.settings;

    tracing::info!("Menu document: {}", config.menu_path.display());
    tracing::info!("Config file: {}", config.config_path.display());
    if config.admin_password.is_none() {
        tracing::warn!("MENUBOARD_ADMIN_PASSWORD not set - storage proxy disabled");
    }

    let storage = MenuStorage::open(&config.menu_path).await?;

    let state = AppState {
        storage: Arc::new(storage),
        settings: Arc::new(settings),
        admin_password: config.admin_password,
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}
