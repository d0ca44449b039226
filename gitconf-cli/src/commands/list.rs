//! List command implementation.
//!
//! This module implements the `list` command, which displays every
//! key/value pair of the selected configuration in text, JSON or YAML.

use crate::error::CliError;
use crate::utils::{read_document, GlobalOptions};
use clap::{Args, ValueEnum};
use gitconf::{ConfigDocument, Scope};
use serde::Serialize;
use std::io::Write;

/// List all values.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "text",
        env = "GITCONF_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Prefix each entry with the scope it came from
    #[arg(long)]
    pub show_scope: bool,
}

/// Output format for list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `key=value` lines
    Text,
    /// JSON array
    Json,
    /// YAML sequence
    Yaml,
}

/// One listed value.
#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    name: String,
    value: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<Scope>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let document = read_document(global)?;
        let entries = collect_entries(&document, self.show_scope);

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        match self.format {
            OutputFormat::Text => format_as_text(&mut handle, &entries)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut handle, &entries)?;
                writeln!(handle)?;
            }
            OutputFormat::Yaml => serde_yaml::to_writer(&mut handle, &entries)?,
        }

        Ok(())
    }
}

/// Every value of every key, keys sorted, values lowest precedence first.
fn collect_entries(document: &ConfigDocument, show_scope: bool) -> Vec<ListEntry<'_>> {
    let mut entries = Vec::new();
    for name in document.keys() {
        for value in document.get_raw(&name).unwrap_or_default() {
            entries.push(ListEntry {
                name: name.clone(),
                value: value.value(),
                scope: show_scope.then(|| value.scope()),
            });
        }
    }
    entries
}

fn format_as_text(out: &mut impl Write, entries: &[ListEntry<'_>]) -> Result<(), CliError> {
    for entry in entries {
        match entry.scope {
            Some(scope) => writeln!(out, "{scope}\t{}={}", entry.name, entry.value)?,
            None => writeln!(out, "{}={}", entry.name, entry.value)?,
        }
    }
    Ok(())
}
