mod admin;
mod config_cmd;
mod language;
mod render;

pub use admin::{AdminCommand, AdminSession};
pub use config_cmd::ConfigCommand;
pub use language::LanguageCommand;
pub use render::RenderCommand;

use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
