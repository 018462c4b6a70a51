use clap::{Args, Subcommand};

use super::OutputFormat;
use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => print!("{}", format_config(config)),
                }
                Ok(())
            }
        }
    }
}

fn format_config(config: &Config) -> String {
    let mut out = String::new();
    out.push_str("Configuration\n");
    out.push_str("=============\n\n");

    match &config.config_file {
        Some(path) => out.push_str(&format!("Config file: {}\n\n", path.display())),
        None => out.push_str(&format!(
            "Config file: {} (not found)\n\n",
            Config::default_config_path().display()
        )),
    }

    out.push_str(&format!("menu: {}\n", config.menu.value));
    out.push_str(&format!("  source: {}\n\n", config.menu.source));

    let fallback = config.fallback.value.as_deref().unwrap_or("(same as menu)");
    out.push_str(&format!("fallback: {}\n", fallback));
    out.push_str(&format!("  source: {}\n\n", config.fallback.source));

    let proxy = config.proxy_url.value.as_deref().unwrap_or("(none, local mode)");
    out.push_str(&format!("proxy_url: {}\n", proxy));
    out.push_str(&format!("  source: {}\n\n", config.proxy_url.source));

    out.push_str(&format!("state_path: {}\n", config.state_path.value.display()));
    out.push_str(&format!("  source: {}\n\n", config.state_path.source));

    let settings = &config.settings;
    let languages: Vec<&str> = settings.languages.iter().map(|l| l.code()).collect();
    out.push_str(&format!("restaurant_name: {}\n", settings.restaurant_name));
    out.push_str(&format!("languages: {}\n", languages.join(", ")));
    out.push_str(&format!("default_lang: {}\n", settings.default_lang));
    out.push_str(&format!("storage_key: {}\n", settings.storage_key));
    out
}
