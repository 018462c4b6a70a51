use tracing::{debug, warn};

use super::navigation::NavigationController;
use super::tracking::{ActiveBand, ActiveSectionTracker, IntersectionEntry, SectionBounds};
use super::view::{render, MenuView};
use crate::models::{Language, MenuDocument};
use crate::settings::Settings;
use crate::source::{DocumentSource, SourceError};
use crate::state::{StateError, StateStore};

/// How the public page picks and remembers its language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererOptions {
    pub storage_key: String,
    pub default_language: Language,
    pub languages: Vec<Language>,
}

impl From<&Settings> for RendererOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            storage_key: settings.storage_key.clone(),
            default_language: settings.default_lang,
            languages: settings.offered_languages(),
        }
    }
}

impl Default for RendererOptions {
    fn default() -> Self {
        RendererOptions::from(&Settings::default())
    }
}

impl RendererOptions {
    fn offers(&self, language: Language) -> bool {
        self.languages.contains(&language)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Pending,
    Loaded(MenuDocument),
    Failed(String),
}

/// The public menu page: loads the document once, renders it in the
/// remembered language and keeps navigation highlighting in sync.
pub struct Renderer<S: StateStore> {
    options: RendererOptions,
    store: S,
    language: Language,
    state: LoadState,
    view: MenuView,
    tracker: ActiveSectionTracker,
    navigation: NavigationController,
}

impl<S: StateStore> Renderer<S> {
    /// Starts in the language remembered in `store`, or the default one
    /// when nothing usable is stored.
    pub fn new(options: RendererOptions, store: S) -> Self {
        let language = store
            .get(&options.storage_key)
            .and_then(|code| Language::parse(&code))
            .filter(|language| options.offers(*language))
            .unwrap_or(options.default_language);
        let view = MenuView::empty(language, &options.languages);

        Self {
            options,
            store,
            language,
            state: LoadState::Pending,
            view,
            tracker: ActiveSectionTracker::new(ActiveBand::default()),
            navigation: NavigationController::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn view(&self) -> &MenuView {
        &self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tracker(&self) -> &ActiveSectionTracker {
        &self.tracker
    }

    pub fn navigation(&mut self) -> &mut NavigationController {
        &mut self.navigation
    }

    /// Fetches the document and renders it. A failed fetch leaves the page
    /// in the failed state with a single message instead of the menu.
    pub async fn load(&mut self, source: &DocumentSource) -> &MenuView {
        let fetched = source.fetch().await;
        if let Err(e) = &fetched {
            warn!(source = %source, error = %e, "Failed to load menu");
        }
        self.accept(fetched)
    }

    /// Renders the outcome of a fetch done elsewhere.
    pub fn accept(&mut self, fetched: Result<MenuDocument, SourceError>) -> &MenuView {
        self.state = match fetched {
            Ok(document) => {
                debug!(categories = document.categories.len(), "Menu loaded");
                LoadState::Loaded(document)
            }
            Err(e) => LoadState::Failed(e.to_string()),
        };
        self.render()
    }

    /// Uses an already loaded document.
    pub fn show(&mut self, document: MenuDocument) -> &MenuView {
        self.state = LoadState::Loaded(document);
        self.render()
    }

    /// Rebuilds the view for the current language. The tracker and the
    /// navigation bindings follow the new sections.
    pub fn render(&mut self) -> &MenuView {
        self.view = match &self.state {
            LoadState::Loaded(document) => render(document, self.language, &self.options.languages),
            LoadState::Failed(_) => MenuView::failed(self.language, &self.options.languages),
            LoadState::Pending => MenuView::empty(self.language, &self.options.languages),
        };
        self.tracker.observe(self.view.section_ids());
        self.navigation.bind(&self.view);
        &self.view
    }

    /// Switches language, re-renders and remembers the choice. Languages
    /// that are not offered fall back to the default one.
    ///
    /// The view switches even when the store rejects the write; the error
    /// is returned so the caller can report it.
    pub fn set_language(&mut self, language: Language) -> Result<&MenuView, StateError> {
        let language = if self.options.offers(language) {
            language
        } else {
            self.options.default_language
        };
        self.language = language;
        self.render();

        self.store.set(&self.options.storage_key, language.code())?;
        Ok(&self.view)
    }

    /// Applies visibility changes and highlights the active section in
    /// both navigation lists.
    pub fn handle_intersections(&mut self, entries: &[IntersectionEntry]) -> Option<&str> {
        let active = self.tracker.apply(entries).map(str::to_string);
        if let Some(id) = &active {
            self.view.set_active(id);
        }
        self.view.active_section()
    }

    /// Samples section positions after a scroll or resize.
    pub fn handle_scroll(&mut self, viewport_height: f64, bounds: &[SectionBounds]) -> Option<&str> {
        let entries = self.tracker.sample(viewport_height, bounds);
        if entries.is_empty() {
            return self.view.active_section();
        }
        self.handle_intersections(&entries)
    }
}
