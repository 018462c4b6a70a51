//! Interactive admin session: log in, edit the menu, save it back.

use clap::Args;
use menuboard_core::editor::{
    CategoryForm, Confirm, Deletion, Editor, EditorError, ItemForm, LoginOutcome, Mode,
    NoticeLevel, SaveOutcome,
};
use menuboard_core::{HttpGateway, Language, LocalizedText, MenuDocument, StorageGateway};
use std::io::{self, BufRead, Write};

use crate::config::Config;

#[derive(Args)]
pub struct AdminCommand {
    /// Storage proxy endpoint (overrides the configured one)
    #[arg(long)]
    proxy_url: Option<String>,
}

impl AdminCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let proxy_url = self
            .proxy_url
            .clone()
            .or_else(|| config.proxy_url.value.clone());
        if proxy_url.is_none() {
            eprintln!("No storage proxy configured; the menu can be edited but not saved.");
        }

        let editor = Editor::new(proxy_url.map(HttpGateway::new), Some(config.fallback_source()));
        let stdin = io::stdin();
        let mut session = AdminSession::new(editor, stdin.lock(), io::stdout());
        session.run().await
    }
}

const HELP: &str = "\
Commands:
  list                          Show categories and items
  toggle <category>             Hide or show a category
  add-category                  Add a category
  rename <category>             Rename a category
  delete-category <category>    Delete a category and its items
  add-item <category>           Add an item
  edit-item <category> <n>      Edit item number n
  delete-item <category> <n>    Delete item number n
  save                          Save the menu
  status                        Show the last status message
  logout                        Log out
  quit                          Leave without saving
In forms, press Enter to keep the shown value or type - to clear it.
";

enum Flow {
    Continue,
    Quit,
}

/// A line-oriented editing session over any input and output.
pub struct AdminSession<G, R, W> {
    editor: Editor<G>,
    input: R,
    output: W,
}

impl<G: StorageGateway, R: BufRead, W: Write> AdminSession<G, R, W> {
    pub fn new(editor: Editor<G>, input: R, output: W) -> Self {
        Self {
            editor,
            input,
            output,
        }
    }

    pub fn editor(&self) -> &Editor<G> {
        &self.editor
    }

    /// Runs until `quit` or end of input.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        writeln!(self.output, "Menuboard admin. Type 'help' for commands.")?;
        loop {
            if self.editor.mode() == Mode::Unauthenticated {
                let Some(password) = prompt(&mut self.input, &mut self.output, "Password: ")?
                else {
                    return Ok(());
                };
                if !password.is_empty() {
                    self.login(&password).await?;
                }
                continue;
            }

            let Some(line) = prompt(&mut self.input, &mut self.output, "> ")? else {
                return Ok(());
            };
            if let Flow::Quit = self.execute(&line).await? {
                return Ok(());
            }
        }
    }

    async fn login(&mut self, password: &str) -> io::Result<()> {
        let result = self.editor.login(password).await;
        let has_notice = self.editor.status().is_some();
        match result {
            Ok(LoginOutcome::Remote) => {
                let count = self.editor.document().map_or(0, |d| d.categories.len());
                writeln!(self.output, "Logged in. {} categories loaded.", count)?;
            }
            Ok(LoginOutcome::Superseded) => {}
            Err(e) if !has_notice => writeln!(self.output, "Error: {}", e)?,
            Ok(LoginOutcome::Local { .. }) | Err(_) => self.print_status()?,
        }
        Ok(())
    }

    async fn execute(&mut self, line: &str) -> io::Result<Flow> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let result: Result<(), CommandError> = match words.as_slice() {
            [] => Ok(()),
            ["help"] => self.output.write_all(HELP.as_bytes()).map_err(Into::into),
            ["quit"] | ["exit"] => return Ok(Flow::Quit),
            ["list"] => {
                let listing = self.editor.document().map(format_listing).unwrap_or_default();
                self.output.write_all(listing.as_bytes()).map_err(Into::into)
            }
            ["status"] => self.print_status().map_err(Into::into),
            ["logout"] => {
                self.editor.logout();
                writeln!(self.output, "Logged out.").map_err(Into::into)
            }
            ["save"] => self.save().await,
            ["toggle", id] => self.toggle(id),
            ["add-category"] => self.edit_category(None),
            ["rename", id] => self.edit_category(Some(*id)),
            ["delete-category", id] => self.delete_category(id),
            ["add-item", id] => self.edit_item(id, None),
            ["edit-item", id, n] => match parse_number(n) {
                Some(index) => self.edit_item(id, Some(index)),
                None => Err(CommandError::Usage(format!("Not an item number: {}", n))),
            },
            ["delete-item", id, n] => match parse_number(n) {
                Some(index) => self.delete_item(id, index),
                None => Err(CommandError::Usage(format!("Not an item number: {}", n))),
            },
            _ => Err(CommandError::Usage(format!(
                "Unknown command: {} (type 'help')",
                line.trim()
            ))),
        };

        match result {
            Ok(()) => {}
            Err(CommandError::Io(e)) => return Err(e),
            Err(CommandError::Editor(e)) => writeln!(self.output, "Error: {}", e)?,
            Err(CommandError::Usage(message)) => writeln!(self.output, "{}", message)?,
        }
        Ok(Flow::Continue)
    }

    fn print_status(&mut self) -> io::Result<()> {
        if let Some(notice) = self.editor.status() {
            let prefix = match notice.level {
                NoticeLevel::Warning => "Warning: ",
                _ => "",
            };
            writeln!(self.output, "{}{}", prefix, notice)?;
        }
        Ok(())
    }

    async fn save(&mut self) -> Result<(), CommandError> {
        let result = self.editor.save().await;
        let has_notice = self.editor.status().is_some();
        match result {
            Ok(SaveOutcome::Superseded) => {}
            Err(e) if !has_notice => writeln!(self.output, "Error: {}", e)?,
            Ok(SaveOutcome::Saved(_)) | Err(_) => self.print_status()?,
        }
        Ok(())
    }

    fn toggle(&mut self, id: &str) -> Result<(), CommandError> {
        match self.editor.toggle_category_visibility(id)? {
            Some(true) => writeln!(self.output, "Category '{}' is now hidden.", id)?,
            Some(false) => writeln!(self.output, "Category '{}' is now visible.", id)?,
            None => writeln!(self.output, "No category '{}'.", id)?,
        }
        Ok(())
    }

    fn edit_category(&mut self, existing: Option<&str>) -> Result<(), CommandError> {
        let mut form = match existing {
            Some(id) => {
                let category = self
                    .document()?
                    .category(id)
                    .ok_or_else(|| EditorError::CategoryNotFound(id.to_string()))?;
                CategoryForm::from_category(category)
            }
            None => CategoryForm::default(),
        };

        let Some(name) = self.read_localized("Name", &form.name)? else {
            return Ok(());
        };
        form.name = name;

        let id = self.editor.upsert_category(&form, existing)?;
        match existing {
            Some(_) => writeln!(self.output, "Renamed category '{}'.", id)?,
            None => writeln!(self.output, "Added category '{}'.", id)?,
        }
        Ok(())
    }

    fn delete_category(&mut self, id: &str) -> Result<(), CommandError> {
        let mut confirm = PromptConfirm {
            input: &mut self.input,
            output: &mut self.output,
        };
        match self.editor.delete_category(id, &mut confirm)? {
            Deletion::Deleted => writeln!(self.output, "Deleted category '{}'.", id)?,
            Deletion::Declined => writeln!(self.output, "Deletion cancelled.")?,
        }
        Ok(())
    }

    fn edit_item(&mut self, category_id: &str, index: Option<usize>) -> Result<(), CommandError> {
        let category = self
            .document()?
            .category(category_id)
            .ok_or_else(|| EditorError::CategoryNotFound(category_id.to_string()))?;
        let mut form = match index {
            Some(index) => {
                let item = category.items.get(index).ok_or_else(|| {
                    EditorError::ItemIndexOutOfRange {
                        category_id: category_id.to_string(),
                        index,
                        len: category.items.len(),
                    }
                })?;
                ItemForm::from_item(item)
            }
            None => ItemForm::default(),
        };

        let Some(name) = self.read_localized("Name", &form.name)? else {
            return Ok(());
        };
        let Some(desc) = self.read_localized("Description", &form.desc)? else {
            return Ok(());
        };
        let Some(price) = self.read_field("Price", &form.price)? else {
            return Ok(());
        };
        let current = if form.sold_out { "y" } else { "n" };
        let Some(sold_out) = self.read_field("Sold out (y/n)", current)? else {
            return Ok(());
        };
        form.name = name;
        form.desc = desc;
        form.price = price;
        form.sold_out = sold_out.eq_ignore_ascii_case("y") || sold_out.eq_ignore_ascii_case("yes");

        let saved = self.editor.upsert_item(category_id, form, index)?;
        match index {
            Some(_) => writeln!(self.output, "Updated item {} in '{}'.", saved + 1, category_id)?,
            None => writeln!(self.output, "Added item {} to '{}'.", saved + 1, category_id)?,
        }
        Ok(())
    }

    fn delete_item(&mut self, category_id: &str, index: usize) -> Result<(), CommandError> {
        let mut confirm = PromptConfirm {
            input: &mut self.input,
            output: &mut self.output,
        };
        match self.editor.delete_item(category_id, index, &mut confirm)? {
            Deletion::Deleted => writeln!(self.output, "Deleted item {}.", index + 1)?,
            Deletion::Declined => writeln!(self.output, "Deletion cancelled.")?,
        }
        Ok(())
    }

    fn document(&self) -> Result<&MenuDocument, EditorError> {
        self.editor.document().ok_or(EditorError::NotAuthenticated)
    }

    /// Asks for one value per language. `None` on end of input.
    fn read_localized(
        &mut self,
        label: &str,
        current: &LocalizedText,
    ) -> io::Result<Option<LocalizedText>> {
        let mut text = current.clone();
        for language in Language::ALL {
            let label = format!("{} ({})", label, language);
            match self.read_field(&label, current.get(language))? {
                Some(value) => text.set(language, value),
                None => return Ok(None),
            }
        }
        Ok(Some(text))
    }

    /// Asks for a single value: Enter keeps `current`, `-` clears it.
    fn read_field(&mut self, label: &str, current: &str) -> io::Result<Option<String>> {
        let question = if current.is_empty() {
            format!("{}: ", label)
        } else {
            format!("{} [{}]: ", label, current)
        };
        let Some(answer) = prompt(&mut self.input, &mut self.output, &question)? else {
            return Ok(None);
        };
        Ok(Some(match answer.as_str() {
            "" => current.to_string(),
            "-" => String::new(),
            _ => answer,
        }))
    }
}

enum CommandError {
    Io(io::Error),
    Editor(EditorError),
    Usage(String),
}

impl From<io::Error> for CommandError {
    fn from(e: io::Error) -> Self {
        CommandError::Io(e)
    }
}

impl From<EditorError> for CommandError {
    fn from(e: EditorError) -> Self {
        CommandError::Editor(e)
    }
}

/// Asks `[y/N]` on the session's own input.
struct PromptConfirm<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<'_, R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        let question = format!("{} [y/N] ", message);
        match prompt(&mut *self.input, &mut *self.output, &question) {
            Ok(Some(answer)) => answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"),
            _ => false,
        }
    }
}

/// Prints `question` and reads one trimmed line. `None` on end of input.
fn prompt(input: &mut impl BufRead, output: &mut impl Write, question: &str) -> io::Result<Option<String>> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Item numbers are shown starting at 1.
fn parse_number(s: &str) -> Option<usize> {
    s.parse::<usize>().ok().filter(|n| *n > 0).map(|n| n - 1)
}

/// Admin listing: German names, hidden and sold-out badges, euro prices.
pub fn format_listing(document: &MenuDocument) -> String {
    if document.categories.is_empty() {
        return "No categories yet. Use 'add-category' to create one.\n".to_string();
    }

    let mut out = String::new();
    for category in &document.categories {
        let count = match category.items.len() {
            1 => "1 item".to_string(),
            n => format!("{} items", n),
        };
        let badge = if category.hidden { " [hidden]" } else { "" };
        out.push_str(&format!(
            "{}  {}{}  ({})\n",
            category.id, category.name.de, badge, count
        ));
        for (i, item) in category.items.iter().enumerate() {
            let badge = if item.is_sold_out { "  [sold out]" } else { "" };
            out.push_str(&format!(
                "  {}. {}  €{}{}\n",
                i + 1,
                item.name.de,
                item.price,
                badge
            ));
        }
    }
    out
}
