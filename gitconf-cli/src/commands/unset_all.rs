//! Unset-all command implementation.

use crate::error::CliError;
use crate::utils::{edit_document, GlobalOptions};
use clap::Args;

/// Remove every value of a name from the selected file.
#[derive(Args)]
pub struct UnsetAllCommand {
    /// Name in `section[.subsection].key` form
    pub name: String,
}

impl UnsetAllCommand {
    /// Execute the unset-all command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        edit_document(global, |document| {
            if document.unset_all(&self.name) {
                Ok(true)
            } else {
                Err(CliError::KeyNotFound(self.name))
            }
        })
    }
}
