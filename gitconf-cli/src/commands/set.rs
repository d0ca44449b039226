//! Set command implementation.

use crate::error::CliError;
use crate::utils::{edit_document, GlobalOptions};
use clap::Args;

/// Set a value, replacing the last one defined in the selected file.
#[derive(Args)]
pub struct SetCommand {
    /// Name in `section[.subsection].key` form
    pub name: String,

    /// New value
    pub value: String,
}

impl SetCommand {
    /// Execute the set command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        edit_document(global, |document| {
            document.set(&self.name, self.value)?;
            Ok(true)
        })
    }
}
