//! Config-as-form editing.
//!
//! The playground edits its own settings with the same machinery it previews
//! schemas with: the JSON Schema of [`PlaygroundConfig`] is laid out by the
//! form shell, seeded with the current values, and `path=value` edits go
//! through the form engine's coercion before being written back as TOML.

use anyhow::Result;
use serde_json::{Map, Value};
use uischema::{
    FormEngine, FormEvent, Panel,
    data::format_document,
    shell::{FormInput, form_panel},
    view::render_panel,
};

use crate::{config::PlaygroundConfig, ctx::AppContext, utils::Assignment};

/// Handler for the `config` command.
pub struct MenuConfigHandler;

impl MenuConfigHandler {
    /// Handles the `config` command.
    ///
    /// * With `schema`, prints the config's JSON Schema.
    /// * With assignments, applies them and saves the config file.
    /// * Otherwise shows the config as a form.
    pub fn handle_config(ctx: &mut AppContext, sets: &[Assignment], schema: bool) -> Result<()> {
        if schema {
            println!("{}", format_document(&PlaygroundConfig::schema()?));
            return Ok(());
        }

        if !sets.is_empty() {
            ctx.config = Self::apply(ctx, &ctx.config, sets)?;
            ctx.config.save(&ctx.config_path)?;
            println!("\nConfiguration saved to {}", ctx.config_path.display());
        }

        let panel = Self::panel(ctx, &ctx.config)?;
        print!("{}", render_panel(&panel, ctx.view_options()));
        Ok(())
    }

    /// The config shown as a form panel.
    pub fn panel(ctx: &AppContext, config: &PlaygroundConfig) -> Result<Panel> {
        let schema = PlaygroundConfig::schema()?;
        let data = serde_json::to_value(config)?;
        Ok(form_panel(
            "Playground settings",
            Some(&schema),
            &Value::Object(Map::new()),
            &data,
            &ctx.engine,
        ))
    }

    /// Apply field edits to `config`, returning the edited copy.
    pub fn apply(
        ctx: &AppContext,
        config: &PlaygroundConfig,
        sets: &[Assignment],
    ) -> Result<PlaygroundConfig> {
        let schema = PlaygroundConfig::schema()?;
        let ui_schema = Value::Object(Map::new());
        let mut data = serde_json::to_value(config)?;

        for set in sets {
            let input = FormInput {
                schema: &schema,
                ui_schema: &ui_schema,
                form_data: &data,
            };
            match ctx.engine.change(&input, &set.path, &set.value)? {
                FormEvent::Change(next) => data = next,
                FormEvent::Submit(_) => {}
            }
        }

        Ok(serde_json::from_value(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ctx(path: PathBuf) -> AppContext {
        AppContext::new(PlaygroundConfig::default(), path).unwrap()
    }

    #[test]
    fn test_apply_coerces_by_field_type() {
        let ctx = ctx(PathBuf::new());
        let config = MenuConfigHandler::apply(
            &ctx,
            &ctx.config,
            &[
                "show_keys=true".parse().unwrap(),
                "form_title=Forms".parse().unwrap(),
            ],
        )
        .unwrap();
        assert!(config.show_keys);
        assert_eq!(config.form_title, "Forms");
        assert!(config.color);

        assert!(MenuConfigHandler::apply(&ctx, &ctx.config, &["color=maybe".parse().unwrap()]).is_err());
        assert!(MenuConfigHandler::apply(&ctx, &ctx.config, &["nope=1".parse().unwrap()]).is_err());
    }

    #[test]
    fn test_panel_shows_current_values() {
        let ctx = ctx(PathBuf::new());
        let panel = MenuConfigHandler::panel(&ctx, &ctx.config).unwrap();
        let tree = panel.tree().expect("config form renders");
        let color = tree
            .walk()
            .find(|e| e.key() == Some("color"))
            .and_then(|e| e.props())
            .expect("color field");
        assert_eq!(color["value"], "true");
    }

    #[test]
    fn test_handle_config_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(crate::config::CONFIG_FILE);
        let mut ctx = ctx(path.clone());
        MenuConfigHandler::handle_config(&mut ctx, &["show_keys=true".parse().unwrap()], false)
            .unwrap();
        assert!(PlaygroundConfig::load(&path).unwrap().show_keys);
    }
}
