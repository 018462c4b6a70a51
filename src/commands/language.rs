use clap::{Args, Subcommand};
use menuboard_core::{FileStateStore, Language, Renderer, RendererOptions, StateStore};

use crate::config::Config;

#[derive(Args)]
pub struct LanguageCommand {
    #[command(subcommand)]
    pub command: Option<LanguageSubcommand>,
}

#[derive(Subcommand)]
pub enum LanguageSubcommand {
    /// Show the remembered language and the offered ones
    Show,

    /// Remember a language for the public menu
    Set {
        /// Language code (de, en, tr, es)
        language: Language,
    },
}

impl LanguageCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let store = FileStateStore::open(&config.state_path.value)?;
        let mut renderer = Renderer::new(RendererOptions::from(&config.settings), store);

        match &self.command {
            None | Some(LanguageSubcommand::Show) => {
                print!("{}", describe(&renderer));
            }
            Some(LanguageSubcommand::Set { language }) => {
                renderer.set_language(*language)?;
                if renderer.language() != *language {
                    eprintln!(
                        "Language '{}' is not offered, using '{}'",
                        language,
                        renderer.language()
                    );
                }
                println!("Language: {}", renderer.language());
            }
        }
        Ok(())
    }
}

fn describe<S: StateStore>(renderer: &Renderer<S>) -> String {
    let options: Vec<String> = renderer
        .view()
        .languages
        .iter()
        .map(|option| {
            if option.selected {
                format!("{} (current)", option.language)
            } else {
                option.language.to_string()
            }
        })
        .collect();
    format!(
        "Language: {}\nOffered: {}\n",
        renderer.language(),
        options.join(", ")
    )
}
