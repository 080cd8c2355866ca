//! Application context and state management.
//!
//! [`AppContext`] ties the loaded configuration to one playground session:
//! the session state, the schema editor, the widget registry and the form
//! engine. CLI commands drive it the way the interactive front end would.

use std::path::PathBuf;

use colored::Colorize;
use uischema::{
    FormEngine, Panel, Registry, SchemaKind, Session, Value,
    catalog,
    editor::SchemaEditor,
    engine::PreviewEngine,
    shell::FormInput,
    view::{ViewOptions, render_panel},
};

use crate::{config::PlaygroundConfig, utils::Assignment};

/// The main application context holding all state.
pub struct AppContext {
    /// Loaded configuration.
    pub config: PlaygroundConfig,
    /// Where the configuration was loaded from.
    pub config_path: PathBuf,
    pub session: Session,
    pub editor: SchemaEditor,
    pub registry: Registry,
    pub engine: PreviewEngine,
}

impl AppContext {
    /// Create a context with the configured startup example loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured startup example does not exist.
    pub fn new(config: PlaygroundConfig, config_path: PathBuf) -> anyhow::Result<Self> {
        let session = match config.initial_example() {
            Some(id) => {
                let example =
                    catalog::find(id).ok_or_else(|| anyhow!("unknown initial example: {id}"))?;
                Session::with_example(example)
            }
            None => Session::new(),
        };
        let mut editor = SchemaEditor::new();
        editor.sync(session.schema());

        Ok(Self {
            config,
            config_path,
            session,
            editor,
            registry: Registry::standard(),
            engine: PreviewEngine,
        })
    }

    /// Select a catalog example by id.
    pub fn select_example(&mut self, id: &str) -> anyhow::Result<()> {
        let example = catalog::find(id).ok_or_else(|| {
            let ids: Vec<&str> = catalog::examples().iter().map(|e| e.id).collect();
            anyhow!("unknown example `{id}`, expected one of: {}", ids.join(", "))
        })?;
        self.session.select_example(example);
        self.editor.sync(self.session.schema());
        Ok(())
    }

    /// Put `text` in the editor and, if it is a valid schema, apply it.
    ///
    /// Returns the detected kind; `None` when the document is ambiguous and
    /// the current mode was kept.
    pub fn edit(&mut self, text: &str) -> anyhow::Result<Option<SchemaKind>> {
        let Some(schema) = self.editor.set_text(text) else {
            bail!(
                "invalid schema: {}",
                self.editor.error().unwrap_or("unknown error")
            );
        };
        let kind = self.session.apply_schema(schema);
        match kind {
            Some(kind) => debug!("schema classified as {kind}"),
            None => warn!("schema is neither a form nor a component, staying in {} mode", self.session.kind()),
        }
        Ok(kind)
    }

    /// Pretty-print `text` through the editor.
    pub fn format_text(&mut self, text: &str) -> anyhow::Result<&str> {
        self.editor.set_text(text);
        if !self.editor.format() {
            bail!(
                "invalid schema: {}",
                self.editor.error().unwrap_or("unknown error")
            );
        }
        Ok(self.editor.text())
    }

    /// Replace the document with the starter form schema.
    pub fn reset(&mut self) -> Option<SchemaKind> {
        let schema = self.editor.reset();
        self.session.apply_schema(schema)
    }

    fn form_input(&self) -> anyhow::Result<FormInput<'_>> {
        if self.session.kind() != SchemaKind::Form {
            bail!("form edits need a form schema, current schema is a {}", self.session.kind());
        }
        let schema = self
            .session
            .schema()
            .ok_or_else(|| anyhow!("no schema loaded"))?;
        Ok(FormInput {
            schema,
            ui_schema: self.session.ui_schema(),
            form_data: self.session.form_data(),
        })
    }

    /// Apply `path=value` field edits to the form data, in order.
    pub fn apply_assignments(&mut self, assignments: &[Assignment]) -> anyhow::Result<()> {
        for assignment in assignments {
            let event = {
                let input = self.form_input()?;
                self.engine
                    .change(&input, &assignment.path, &assignment.value)?
            };
            self.session.handle_form_event(event);
        }
        Ok(())
    }

    /// Submit the form and return the submitted data.
    pub fn submit(&mut self) -> anyhow::Result<Value> {
        let event = {
            let input = self.form_input()?;
            self.engine.submit(&input)
        };
        self.session.handle_form_event(event);
        self.session
            .last_submit()
            .cloned()
            .ok_or_else(|| anyhow!("form engine did not submit"))
    }

    /// Render the panel for the current session.
    pub fn panel(&self) -> Panel {
        self.session
            .render(&self.registry, &self.engine, &self.config.titles())
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            show_keys: self.config.show_keys,
        }
    }

    /// Print the current panel as a text tree or as JSON.
    pub fn print_panel(&self, json: bool) -> anyhow::Result<()> {
        let panel = self.panel();
        if json {
            println!("{}", serde_json::to_string_pretty(&panel)?);
        } else {
            print!("{}", render_panel(&panel, self.view_options()));
        }
        Ok(())
    }

    /// Print the registered widget names.
    pub fn print_widgets(&self) {
        println!("{} widgets", self.registry.len().to_string().bold());
        for name in self.registry.names() {
            println!("  {name}");
        }
    }

    /// Print the catalog, marking the selected example.
    pub fn print_examples(&self) {
        for example in catalog::examples() {
            let marker = if self.session.selected() == Some(example.id) {
                "*"
            } else {
                " "
            };
            println!(
                "{marker} {:<18} {:<10} {}",
                example.id.bold(),
                example.kind.to_string().cyan(),
                example.title
            );
            println!("    {}", example.description.dimmed());
        }
    }
}
