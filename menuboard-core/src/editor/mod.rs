//! Admin editing session over a menu document.
//!
//! The editor loads the document through a [`StorageGateway`], applies
//! every change to an in-memory copy and writes the whole document back on
//! [`Editor::save`]. When the gateway is unreachable the editor falls back
//! to a read-only local copy ("local mode"): edits still apply in memory but
//! saving is refused.
//!
//! Both network operations come in two halves (`begin_load`/`complete_load`,
//! `begin_save`/`finish_save`) so a caller that releases the editor while a
//! request is in flight can still finish it safely. Every login and logout
//! starts a new session generation; a completion carrying an older
//! generation is discarded.

mod confirm;
mod error;
mod form;
mod notice;

use std::time::Instant;

use crate::gateway::{Credential, GatewayError, Revision, Snapshot, StorageGateway};
use crate::models::{slugify, Category, MenuDocument};
use crate::source::DocumentSource;

pub use confirm::{Confirm, Deletion};
pub use error::EditorError;
pub use form::{CategoryForm, ItemForm};
pub use notice::{Notice, NoticeLevel, SUCCESS_NOTICE_TTL};

/// Id used when a category name has no slug-able characters.
const FALLBACK_SLUG: &str = "category";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Unauthenticated,
    Authenticated,
}

/// How a login ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Loaded from the store; saving is possible.
    Remote,
    /// Store unreachable, loaded the local copy. Carries the store error.
    Local { reason: String },
    /// A newer login or a logout happened meanwhile; nothing changed.
    Superseded,
}

/// How a save ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(Revision),
    Superseded,
}

/// A load started by [`Editor::begin_load`].
#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
    credential: Credential,
}

impl LoadTicket {
    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

/// A save started by [`Editor::begin_save`]; holds what gets written.
#[derive(Debug)]
pub struct SaveTicket {
    generation: u64,
    credential: Credential,
    document: MenuDocument,
    revision: Revision,
}

impl SaveTicket {
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn document(&self) -> &MenuDocument {
        &self.document
    }

    pub fn revision(&self) -> &Revision {
        &self.revision
    }
}

pub struct Editor<G> {
    gateway: Option<G>,
    fallback: Option<DocumentSource>,
    credential: Option<Credential>,
    document: Option<MenuDocument>,
    revision: Option<Revision>,
    mode: Mode,
    generation: u64,
    saving: bool,
    notice: Option<Notice>,
}

impl<G: StorageGateway> Editor<G> {
    /// Creates a logged-out editor. Without a gateway every login ends in
    /// local mode; without a fallback an unreachable gateway fails the login.
    pub fn new(gateway: Option<G>, fallback: Option<DocumentSource>) -> Self {
        Self {
            gateway,
            fallback,
            credential: None,
            document: None,
            revision: None,
            mode: Mode::Unauthenticated,
            generation: 0,
            saving: false,
            notice: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn document(&self) -> Option<&MenuDocument> {
        self.document.as_ref()
    }

    pub fn revision(&self) -> Option<&Revision> {
        self.revision.as_ref()
    }

    /// Logged in, but without a revision to write against.
    pub fn is_local_mode(&self) -> bool {
        self.mode == Mode::Authenticated && self.revision.is_none()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Current notice, hiding a success notice once it has expired.
    pub fn status_at(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| !n.is_expired(now))
    }

    pub fn status(&self) -> Option<&Notice> {
        self.status_at(Instant::now())
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice::new(level, message));
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Logs in with `password` and loads the document.
    pub async fn login(&mut self, password: &str) -> Result<LoginOutcome, EditorError> {
        let ticket = self.begin_load(password);
        let result = self.read_remote(&ticket.credential).await;
        self.complete_load(ticket, result).await
    }

    /// Stores the credential and starts a new session generation.
    pub fn begin_load(&mut self, password: &str) -> LoadTicket {
        self.generation += 1;
        self.saving = false;
        let credential = Credential::new(password);
        self.credential = Some(credential.clone());
        self.notify(NoticeLevel::Info, "Loading menu...");
        LoadTicket {
            generation: self.generation,
            credential,
        }
    }

    /// Reads through the gateway, failing as a transport error when no
    /// gateway is configured.
    pub async fn read_remote(&self, credential: &Credential) -> Result<Snapshot, GatewayError> {
        match &self.gateway {
            Some(gateway) => gateway.read(credential).await,
            None => Err(GatewayError::transport("No storage proxy configured")),
        }
    }

    /// Applies the result of a read started with [`Editor::begin_load`].
    pub async fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Snapshot, GatewayError>,
    ) -> Result<LoginOutcome, EditorError> {
        if ticket.generation != self.generation {
            tracing::debug!("Discarding superseded menu load");
            return Ok(LoginOutcome::Superseded);
        }

        match result {
            Ok(snapshot) => {
                self.document = Some(snapshot.document);
                self.revision = Some(snapshot.revision);
                self.mode = Mode::Authenticated;
                self.notice = None;
                Ok(LoginOutcome::Remote)
            }
            Err(GatewayError::Auth) => {
                self.reset_session();
                self.notify(NoticeLevel::Error, "Wrong password.");
                Err(EditorError::WrongPassword)
            }
            Err(remote) => {
                tracing::warn!("Storage proxy unreachable, loading local menu: {}", remote);
                let local = match &self.fallback {
                    Some(source) => source.fetch().await.map_err(|e| e.to_string()),
                    None => Err("no local menu configured".to_string()),
                };

                match local {
                    Ok(document) => {
                        self.document = Some(document);
                        self.revision = None;
                        self.mode = Mode::Authenticated;
                        self.notify(
                            NoticeLevel::Warning,
                            format!(
                                "Local mode: the storage proxy could not be reached (error: {}). \
                                 Changes are only shown here and cannot be saved.",
                                remote
                            ),
                        );
                        Ok(LoginOutcome::Local {
                            reason: remote.to_string(),
                        })
                    }
                    Err(local) => {
                        self.reset_session();
                        self.notify(
                            NoticeLevel::Error,
                            "Storage proxy unreachable and no local menu found.",
                        );
                        Err(EditorError::Unavailable { remote, local })
                    }
                }
            }
        }
    }

    /// Drops credential, document and revision. Safe to call repeatedly.
    pub fn logout(&mut self) {
        self.generation += 1;
        self.reset_session();
        self.notice = None;
    }

    fn reset_session(&mut self) {
        self.credential = None;
        self.document = None;
        self.revision = None;
        self.mode = Mode::Unauthenticated;
        self.saving = false;
    }

    fn document_mut(&mut self) -> Result<&mut MenuDocument, EditorError> {
        if self.mode != Mode::Authenticated {
            return Err(EditorError::NotAuthenticated);
        }
        self.document.as_mut().ok_or(EditorError::NotAuthenticated)
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// Flips `hidden` on a category. Returns the new value, or `None` when
    /// there is no such category.
    pub fn toggle_category_visibility(
        &mut self,
        category_id: &str,
    ) -> Result<Option<bool>, EditorError> {
        let document = self.document_mut()?;
        Ok(document.category_mut(category_id).map(|category| {
            category.hidden = !category.hidden;
            category.hidden
        }))
    }

    /// Renames `existing` or appends a new, empty category. Returns the id.
    ///
    /// New ids are derived from the German name. A colliding slug gets the
    /// first free numeric suffix (`suppen-2`), so ids stay unique.
    pub fn upsert_category(
        &mut self,
        form: &CategoryForm,
        existing: Option<&str>,
    ) -> Result<String, EditorError> {
        let name = form.validated_name()?;
        let document = self.document_mut()?;

        match existing {
            Some(id) => {
                let category = document
                    .category_mut(id)
                    .ok_or_else(|| EditorError::CategoryNotFound(id.to_string()))?;
                category.name = name;
                Ok(id.to_string())
            }
            None => {
                let slug = slugify(&name.de);
                let base = if slug.is_empty() { FALLBACK_SLUG } else { slug.as_str() };
                let id = document.unique_id(base);
                document.categories.push(Category::new(id.clone(), name));
                Ok(id)
            }
        }
    }

    /// Removes a category and all its items after confirmation.
    pub fn delete_category(
        &mut self,
        category_id: &str,
        confirm: &mut impl Confirm,
    ) -> Result<Deletion, EditorError> {
        let document = self.document_mut()?;
        let index = document
            .position(category_id)
            .ok_or_else(|| EditorError::CategoryNotFound(category_id.to_string()))?;

        let category = &document.categories[index];
        let message = format!(
            "Delete category \"{}\" with {} items?",
            category.name.de,
            category.items.len()
        );
        if !confirm.confirm(&message) {
            return Ok(Deletion::Declined);
        }

        document.categories.remove(index);
        Ok(Deletion::Deleted)
    }

    // ------------------------------------------------------------------
    // Items
    // ------------------------------------------------------------------

    /// Replaces the item at `existing_index` or appends a new one.
    /// Returns the item's index. An index past the end is rejected and
    /// leaves the category untouched.
    pub fn upsert_item(
        &mut self,
        category_id: &str,
        form: ItemForm,
        existing_index: Option<usize>,
    ) -> Result<usize, EditorError> {
        let item = form.into_item()?;
        let document = self.document_mut()?;
        let category = document
            .category_mut(category_id)
            .ok_or_else(|| EditorError::CategoryNotFound(category_id.to_string()))?;

        match existing_index {
            Some(index) => {
                let len = category.items.len();
                let slot = category.items.get_mut(index).ok_or_else(|| {
                    EditorError::ItemIndexOutOfRange {
                        category_id: category_id.to_string(),
                        index,
                        len,
                    }
                })?;
                *slot = item;
                Ok(index)
            }
            None => {
                category.items.push(item);
                Ok(category.items.len() - 1)
            }
        }
    }

    /// Removes an item after confirmation.
    pub fn delete_item(
        &mut self,
        category_id: &str,
        index: usize,
        confirm: &mut impl Confirm,
    ) -> Result<Deletion, EditorError> {
        let document = self.document_mut()?;
        let category = document
            .category_mut(category_id)
            .ok_or_else(|| EditorError::CategoryNotFound(category_id.to_string()))?;

        let len = category.items.len();
        let item = category
            .items
            .get(index)
            .ok_or_else(|| EditorError::ItemIndexOutOfRange {
                category_id: category_id.to_string(),
                index,
                len,
            })?;

        if !confirm.confirm(&format!("Delete \"{}\"?", item.name.de)) {
            return Ok(Deletion::Declined);
        }

        category.items.remove(index);
        Ok(Deletion::Deleted)
    }

    // ------------------------------------------------------------------
    // Saving
    // ------------------------------------------------------------------

    /// Writes the document back to the store.
    pub async fn save(&mut self) -> Result<SaveOutcome, EditorError> {
        let ticket = self.begin_save()?;
        let result = match &self.gateway {
            Some(gateway) => {
                gateway
                    .write(&ticket.credential, &ticket.document, &ticket.revision)
                    .await
            }
            None => Err(GatewayError::transport("No storage proxy configured")),
        };
        self.finish_save(ticket, result)
    }

    /// Snapshots the document for writing. Only one save may be in flight.
    pub fn begin_save(&mut self) -> Result<SaveTicket, EditorError> {
        if self.mode != Mode::Authenticated {
            return Err(EditorError::NotAuthenticated);
        }
        if self.saving {
            return Err(EditorError::SaveInProgress);
        }
        if self.revision.is_none() {
            self.notify(
                NoticeLevel::Error,
                "No storage proxy configured: local mode.",
            );
            return Err(EditorError::LocalMode);
        }
        let (Some(document), Some(credential), Some(revision)) =
            (&self.document, &self.credential, &self.revision)
        else {
            return Err(EditorError::NotAuthenticated);
        };

        let ticket = SaveTicket {
            generation: self.generation,
            credential: credential.clone(),
            document: document.clone(),
            revision: revision.clone(),
        };
        self.saving = true;
        self.notify(NoticeLevel::Info, "Saving...");
        Ok(ticket)
    }

    /// Applies the result of a write started with [`Editor::begin_save`].
    ///
    /// On failure the document and revision stay as they were so the save
    /// can be retried.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<Revision, GatewayError>,
    ) -> Result<SaveOutcome, EditorError> {
        if ticket.generation != self.generation {
            tracing::debug!("Discarding result of a save from an ended session");
            return Ok(SaveOutcome::Superseded);
        }
        self.saving = false;

        match result {
            Ok(revision) => {
                tracing::info!("Menu saved, new revision {}", revision);
                self.revision = Some(revision.clone());
                self.notify(
                    NoticeLevel::Success,
                    "Saved! The public menu will update shortly.",
                );
                Ok(SaveOutcome::Saved(revision))
            }
            Err(GatewayError::Conflict) => {
                tracing::warn!("Save rejected, stored menu changed since revision {}", ticket.revision);
                self.notify(
                    NoticeLevel::Error,
                    "The menu was changed elsewhere since it was loaded. \
                     Your edit was not applied; reload and make it again.",
                );
                Err(EditorError::Gateway(GatewayError::Conflict))
            }
            Err(error) => {
                self.notify(NoticeLevel::Error, format!("Error: {}", error));
                Err(EditorError::Gateway(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryGateway;
    use crate::models::{Item, Language, LocalizedText};
    use std::time::Duration;
    use tempfile::tempdir;

    fn sample() -> MenuDocument {
        MenuDocument::new(vec![
            Category::new("a", LocalizedText::new("Suppen")).with_items(vec![
                Item::new(LocalizedText::new("Tom Kha"), "8,50"),
                Item::new(LocalizedText::new("Pho"), "9,00"),
            ]),
            Category::new("b", LocalizedText::new("Desserts")),
        ])
    }

    fn item_form(name: &str, price: &str) -> ItemForm {
        ItemForm {
            name: LocalizedText::new(name),
            price: price.to_string(),
            ..ItemForm::default()
        }
    }

    async fn logged_in() -> (Editor<MemoryGateway>, MemoryGateway) {
        let gateway = MemoryGateway::new("pw", &sample()).unwrap();
        let mut editor = Editor::new(Some(gateway.clone()), None);
        assert_eq!(editor.login("pw").await.unwrap(), LoginOutcome::Remote);
        (editor, gateway)
    }

    fn yes() -> impl FnMut(&str) -> bool {
        |_: &str| true
    }

    fn no() -> impl FnMut(&str) -> bool {
        |_: &str| false
    }

    #[tokio::test]
    async fn test_login_loads_document_and_revision() {
        let (editor, gateway) = logged_in().await;
        assert_eq!(editor.mode(), Mode::Authenticated);
        assert_eq!(editor.document(), Some(&sample()));
        assert_eq!(editor.revision(), gateway.revision().as_ref());
        assert!(!editor.is_local_mode());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let gateway = MemoryGateway::new("pw", &sample()).unwrap();
        let mut editor = Editor::new(Some(gateway), None);

        let err = editor.login("nope").await.unwrap_err();
        assert_eq!(err, EditorError::WrongPassword);
        assert_eq!(editor.mode(), Mode::Unauthenticated);
        assert!(editor.document().is_none());
        assert_eq!(editor.status().unwrap().message, "Wrong password.");
    }

    #[tokio::test]
    async fn test_login_falls_back_to_local_copy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("menu.json");
        std::fs::write(&path, sample().to_pretty_json().unwrap()).unwrap();

        let gateway = MemoryGateway::new("pw", &MenuDocument::default()).unwrap();
        gateway.set_outage(Some(GatewayError::transport("connection refused")));
        let mut editor = Editor::new(Some(gateway.clone()), Some(DocumentSource::Path(path)));

        let outcome = editor.login("pw").await.unwrap();
        assert_eq!(
            outcome,
            LoginOutcome::Local {
                reason: "connection refused".into()
            }
        );
        assert!(editor.is_local_mode());
        assert_eq!(editor.document(), Some(&sample()));
        let notice = editor.status().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("connection refused"));

        // Edits apply locally, saving never reaches the gateway
        editor.toggle_category_visibility("a").unwrap();
        assert_eq!(editor.save().await, Err(EditorError::LocalMode));
        assert_eq!(gateway.write_count(), 0);
        assert!(editor.document().unwrap().categories[0].hidden);
    }

    #[tokio::test]
    async fn test_login_without_gateway_or_fallback_fails() {
        let mut editor: Editor<MemoryGateway> = Editor::new(None, None);
        let err = editor.login("pw").await.unwrap_err();
        assert!(matches!(err, EditorError::Unavailable { .. }));
        assert_eq!(editor.mode(), Mode::Unauthenticated);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (mut editor, _) = logged_in().await;
        editor.logout();
        editor.logout();
        assert_eq!(editor.mode(), Mode::Unauthenticated);
        assert!(editor.document().is_none());
        assert!(editor.revision().is_none());
        assert_eq!(
            editor.toggle_category_visibility("a"),
            Err(EditorError::NotAuthenticated)
        );
    }

    #[tokio::test]
    async fn test_stale_load_does_not_overwrite_newer_session() {
        let gateway = MemoryGateway::new("pw", &sample()).unwrap();
        let mut editor = Editor::new(Some(gateway.clone()), None);

        let stale = editor.begin_load("pw");
        let stale_result = editor.read_remote(stale.credential()).await;

        // A fresh login completes first with a different document
        let mut newer = sample();
        newer.categories.truncate(1);
        gateway.replace(&newer).unwrap();
        editor.login("pw").await.unwrap();

        let outcome = editor.complete_load(stale, stale_result).await.unwrap();
        assert_eq!(outcome, LoginOutcome::Superseded);
        assert_eq!(editor.document(), Some(&newer));
        assert_eq!(editor.revision(), gateway.revision().as_ref());
    }

    #[tokio::test]
    async fn test_load_completing_after_logout_is_ignored() {
        let gateway = MemoryGateway::new("pw", &sample()).unwrap();
        let mut editor = Editor::new(Some(gateway), None);

        let ticket = editor.begin_load("pw");
        let result = editor.read_remote(ticket.credential()).await;
        editor.logout();

        assert_eq!(
            editor.complete_load(ticket, result).await.unwrap(),
            LoginOutcome::Superseded
        );
        assert_eq!(editor.mode(), Mode::Unauthenticated);
        assert!(editor.document().is_none());
    }

    #[tokio::test]
    async fn test_toggle_visibility() {
        let (mut editor, _) = logged_in().await;
        assert_eq!(editor.toggle_category_visibility("a").unwrap(), Some(true));
        assert_eq!(editor.toggle_category_visibility("a").unwrap(), Some(false));
        assert_eq!(editor.toggle_category_visibility("zzz").unwrap(), None);
    }

    #[tokio::test]
    async fn test_upsert_category_creates_slug() {
        let (mut editor, _) = logged_in().await;
        let form = CategoryForm::new(LocalizedText::new("  Côte d'Azur!! ").with(Language::En, "Riviera"));

        let id = editor.upsert_category(&form, None).unwrap();
        assert_eq!(id, "c-te-d-azur");

        let doc = editor.document().unwrap();
        let created = doc.categories.last().unwrap();
        assert_eq!(created.id, "c-te-d-azur");
        assert_eq!(created.name.de, "Côte d'Azur!!");
        assert_eq!(created.name.en, "Riviera");
        assert!(created.items.is_empty());
        assert!(!created.hidden);
    }

    #[tokio::test]
    async fn test_upsert_category_disambiguates_collisions() {
        let (mut editor, _) = logged_in().await;
        let form = CategoryForm::new(LocalizedText::new("A"));

        assert_eq!(editor.upsert_category(&form, None).unwrap(), "a-2");
        assert_eq!(editor.upsert_category(&form, None).unwrap(), "a-3");
        assert!(editor.document().unwrap().violations().is_empty());

        let symbols = CategoryForm::new(LocalizedText::new("!!!"));
        assert_eq!(editor.upsert_category(&symbols, None).unwrap(), "category");
    }

    #[tokio::test]
    async fn test_upsert_category_renames_existing() {
        let (mut editor, _) = logged_in().await;
        let form = CategoryForm::new(LocalizedText::new("Suppen & Eintöpfe"));

        assert_eq!(editor.upsert_category(&form, Some("a")).unwrap(), "a");
        let doc = editor.document().unwrap();
        assert_eq!(doc.categories[0].id, "a");
        assert_eq!(doc.categories[0].name.de, "Suppen & Eintöpfe");
        assert_eq!(doc.categories[0].items.len(), 2);

        assert_eq!(
            editor.upsert_category(&form, Some("missing")),
            Err(EditorError::CategoryNotFound("missing".into()))
        );
    }

    #[tokio::test]
    async fn test_upsert_category_requires_german_name() {
        let (mut editor, _) = logged_in().await;
        let form = CategoryForm::new(LocalizedText::default().with(Language::En, "Soups"));
        assert_eq!(
            editor.upsert_category(&form, None),
            Err(EditorError::MissingFallbackName)
        );
        assert_eq!(editor.document(), Some(&sample()));
    }

    #[tokio::test]
    async fn test_delete_category_needs_confirmation() {
        let (mut editor, _) = logged_in().await;

        let mut asked = String::new();
        let mut declined = |msg: &str| {
            asked = msg.to_string();
            false
        };
        assert_eq!(
            editor.delete_category("a", &mut declined).unwrap(),
            Deletion::Declined
        );
        assert_eq!(asked, "Delete category \"Suppen\" with 2 items?");
        assert_eq!(editor.document().unwrap().categories.len(), 2);

        assert_eq!(
            editor.delete_category("a", &mut yes()).unwrap(),
            Deletion::Deleted
        );
        let doc = editor.document().unwrap();
        assert_eq!(doc.categories.len(), 1);
        assert_eq!(doc.categories[0].id, "b");
    }

    #[tokio::test]
    async fn test_upsert_item_append_and_replace() {
        let (mut editor, _) = logged_in().await;

        let index = editor
            .upsert_item("b", item_form(" Baklava ", " 4,00 "), None)
            .unwrap();
        assert_eq!(index, 0);
        assert_eq!(editor.document().unwrap().categories[1].items[0].price, "4,00");

        let index = editor
            .upsert_item("a", item_form("Tom Yum", "9,50"), Some(0))
            .unwrap();
        assert_eq!(index, 0);
        let items = &editor.document().unwrap().categories[0].items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name.de, "Tom Yum");
        assert_eq!(items[1].name.de, "Pho");
    }

    #[tokio::test]
    async fn test_upsert_item_out_of_range_leaves_document_unchanged() {
        let (mut editor, _) = logged_in().await;

        let err = editor
            .upsert_item("a", item_form("Ghost", "1"), Some(2))
            .unwrap_err();
        assert_eq!(
            err,
            EditorError::ItemIndexOutOfRange {
                category_id: "a".into(),
                index: 2,
                len: 2
            }
        );
        assert_eq!(editor.document(), Some(&sample()));

        assert_eq!(
            editor.upsert_item("zzz", item_form("Ghost", "1"), None),
            Err(EditorError::CategoryNotFound("zzz".into()))
        );
    }

    #[tokio::test]
    async fn test_delete_item() {
        let (mut editor, _) = logged_in().await;

        let mut asked = String::new();
        let mut declined = |msg: &str| {
            asked = msg.to_string();
            false
        };
        assert_eq!(
            editor.delete_item("a", 1, &mut declined).unwrap(),
            Deletion::Declined
        );
        assert_eq!(asked, "Delete \"Pho\"?");

        assert_eq!(editor.delete_item("a", 0, &mut yes()).unwrap(), Deletion::Deleted);
        let items = &editor.document().unwrap().categories[0].items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name.de, "Pho");

        assert!(matches!(
            editor.delete_item("a", 5, &mut yes()),
            Err(EditorError::ItemIndexOutOfRange { index: 5, len: 1, .. })
        ));
        assert!(matches!(
            editor.delete_item("a", 0, &mut no()),
            Ok(Deletion::Declined)
        ));
    }

    #[tokio::test]
    async fn test_save_roundtrip_adopts_new_revision() {
        let (mut editor, gateway) = logged_in().await;
        let initial = editor.revision().cloned().unwrap();

        editor.toggle_category_visibility("b").unwrap();
        let outcome = editor.save().await.unwrap();

        let SaveOutcome::Saved(revision) = outcome else {
            panic!("expected a saved outcome");
        };
        assert_ne!(revision, initial);
        assert_eq!(editor.revision(), Some(&revision));

        let snapshot = gateway.read(&Credential::new("pw")).await.unwrap();
        assert_eq!(&snapshot.document, editor.document().unwrap());
        assert_eq!(snapshot.revision, revision);

        // The adopted revision makes the next save valid too
        editor.toggle_category_visibility("b").unwrap();
        assert!(editor.save().await.is_ok());
        assert_eq!(gateway.write_count(), 2);
    }

    #[tokio::test]
    async fn test_save_success_notice_expires() {
        let (mut editor, _) = logged_in().await;
        editor.save().await.unwrap();

        let notice = editor.status().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        let later = Instant::now() + SUCCESS_NOTICE_TTL + Duration::from_millis(1);
        assert!(editor.status_at(later).is_none());
    }

    #[tokio::test]
    async fn test_save_with_stale_revision_conflicts() {
        let (mut editor, gateway) = logged_in().await;
        let revision = editor.revision().cloned();

        gateway.replace(&MenuDocument::default()).unwrap();
        editor.toggle_category_visibility("a").unwrap();
        let before = editor.document().cloned();

        let err = editor.save().await.unwrap_err();
        assert_eq!(err, EditorError::Gateway(GatewayError::Conflict));
        assert_eq!(editor.document().cloned(), before);
        assert_eq!(editor.revision().cloned(), revision);
        assert!(!editor.is_saving());
        assert_eq!(editor.status().unwrap().level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_save_transport_failure_allows_retry() {
        let (mut editor, gateway) = logged_in().await;
        gateway.set_outage(Some(GatewayError::transport("502: Bad Gateway")));

        let err = editor.save().await.unwrap_err();
        assert_eq!(
            err,
            EditorError::Gateway(GatewayError::transport("502: Bad Gateway"))
        );
        assert_eq!(editor.status().unwrap().message, "Error: 502: Bad Gateway");

        gateway.set_outage(None);
        assert!(editor.save().await.is_ok());
    }

    #[tokio::test]
    async fn test_second_save_while_one_is_outstanding_is_rejected() {
        let (mut editor, gateway) = logged_in().await;

        let ticket = editor.begin_save().unwrap();
        assert!(editor.is_saving());
        assert!(matches!(editor.begin_save(), Err(EditorError::SaveInProgress)));

        let result = gateway
            .write(ticket.credential(), ticket.document(), ticket.revision())
            .await;
        assert!(matches!(
            editor.finish_save(ticket, result),
            Ok(SaveOutcome::Saved(_))
        ));
        assert!(!editor.is_saving());
        assert!(editor.begin_save().is_ok());
    }

    #[tokio::test]
    async fn test_save_finishing_after_logout_is_ignored() {
        let (mut editor, gateway) = logged_in().await;

        let ticket = editor.begin_save().unwrap();
        let result = gateway
            .write(ticket.credential(), ticket.document(), ticket.revision())
            .await;
        editor.logout();

        assert_eq!(editor.finish_save(ticket, result), Ok(SaveOutcome::Superseded));
        assert!(editor.revision().is_none());
    }

    #[tokio::test]
    async fn test_save_requires_login() {
        let gateway = MemoryGateway::new("pw", &sample()).unwrap();
        let mut editor = Editor::new(Some(gateway), None);
        assert_eq!(editor.save().await, Err(EditorError::NotAuthenticated));
    }
}
