//! Unset command implementation.

use crate::error::CliError;
use crate::utils::{edit_document, GlobalOptions};
use clap::Args;

/// Remove the last value of a name from the selected file.
#[derive(Args)]
pub struct UnsetCommand {
    /// Name in `section[.subsection].key` form
    pub name: String,
}

impl UnsetCommand {
    /// Execute the unset command.
    ///
    /// Fails with [`CliError::KeyNotFound`] if the file has no value to
    /// remove; the file is left untouched in that case.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        edit_document(global, |document| {
            if document.unset(&self.name) {
                Ok(true)
            } else {
                Err(CliError::KeyNotFound(self.name))
            }
        })
    }
}
