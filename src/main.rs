use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use menuboard::commands::{AdminCommand, ConfigCommand, LanguageCommand, RenderCommand};
use menuboard::config::Config;

#[derive(Parser)]
#[command(name = "menuboard")]
#[command(version)]
#[command(about = "A multi-language restaurant menu", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the public menu
    Render(RenderCommand),

    /// Show or change the menu language
    Language(LanguageCommand),

    /// Edit the menu interactively
    Admin(AdminCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "menuboard=warn,menuboard_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Render(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Language(cmd)) => {
            cmd.run(&config)?;
        }
        Some(Commands::Admin(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
