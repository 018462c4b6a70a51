use clap::{Args, ValueEnum};
use menuboard_core::render::MenuView;
use menuboard_core::{FileStateStore, Language, LoadState, Renderer, RendererOptions};

use crate::config::Config;
use crate::page::render_page;

#[derive(Clone, ValueEnum, Default)]
pub enum RenderFormat {
    #[default]
    Text,
    Json,
    Html,
}

#[derive(Args)]
pub struct RenderCommand {
    /// Language to show; remembered for later runs
    #[arg(long)]
    lang: Option<Language>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: RenderFormat,
}

impl RenderCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let store = FileStateStore::open(&config.state_path.value)?;
        let mut renderer = Renderer::new(RendererOptions::from(&config.settings), store);
        if let Some(language) = self.lang {
            renderer.set_language(language)?;
        }

        renderer.load(&config.menu_source()).await;
        if let LoadState::Failed(reason) = renderer.state() {
            return Err(format!("Could not load menu from {}: {}", config.menu.value, reason).into());
        }

        let view = renderer.view();
        match self.format {
            RenderFormat::Text => print!("{}", format_text(view)),
            RenderFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
            RenderFormat::Html => println!("{}", render_page(&config.settings, view).into_string()),
        }
        Ok(())
    }
}

fn format_text(view: &MenuView) -> String {
    let mut out = String::new();

    let languages: Vec<String> = view
        .languages
        .iter()
        .map(|option| {
            if option.selected {
                format!("[{}]", option.language)
            } else {
                option.language.to_string()
            }
        })
        .collect();
    out.push_str(&format!("Language: {}\n", languages.join(" ")));

    let labels: Vec<&str> = view.primary_nav.iter().map(|e| e.label.as_str()).collect();
    out.push_str(&format!("Sections: {}\n", labels.join(" | ")));

    if let Some(message) = &view.message {
        out.push_str(&format!("\n{}\n", message));
    }

    for section in &view.sections {
        out.push_str(&format!("\n{}\n", section.title));
        out.push_str(&format!("{}\n", "-".repeat(section.title.chars().count())));
        for item in &section.items {
            out.push_str(&format!("{} — {}\n", item.name, item.price));
            if let Some(desc) = &item.description {
                out.push_str(&format!("    {}\n", desc));
            }
        }
    }
    out
}
