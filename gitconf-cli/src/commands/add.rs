//! Add command implementation.

use crate::error::CliError;
use crate::utils::{edit_document, GlobalOptions};
use clap::Args;

/// Append a value to a name, keeping the existing ones.
#[derive(Args)]
pub struct AddCommand {
    /// Name in `section[.subsection].key` form
    pub name: String,

    /// Value to append
    pub value: String,
}

impl AddCommand {
    /// Execute the add command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        edit_document(global, |document| {
            document.add(&self.name, self.value)?;
            Ok(true)
        })
    }
}
