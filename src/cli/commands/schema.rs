//! Schema command implementation.
//!
//! `preflight schema` prints the JSON Schema of `preflight.yml` for editor
//! integration.

use crate::config::PreflightConfig;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
#[derive(Debug, Default)]
pub struct SchemaCommand;

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new() -> Self {
        Self
    }

    /// The schema as pretty-printed JSON.
    pub fn render(&self) -> Result<String> {
        let schema = schemars::schema_for!(PreflightConfig);
        let json = serde_json::to_string_pretty(&schema).map_err(anyhow::Error::from)?;
        Ok(json)
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // Not subject to --quiet.
        let json = self.render()?;
        let mut out = console::Term::stdout();
        if std::io::Write::write_all(&mut out, format!("{}\n", json).as_bytes()).is_err() {
            ui.error("Failed to write schema");
            return Ok(CommandResult::failure(1));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_describes_config_fields() {
        let json = SchemaCommand::new().render().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let properties = value["properties"].as_object().unwrap();
        for field in ["self_test", "requirements", "cache", "rules", "settings"] {
            assert!(properties.contains_key(field), "missing {field}");
        }
    }
}
