//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `get` / `get_all`: Print values of named keys
//! - `list`: Print every key/value pair
//! - `add` / `set`: Append or replace a value
//! - `unset` / `unset_all`: Remove values
//! - `show_path`: Print the repository metadata directory
//! - `completions`: Generate shell completion scripts

pub mod add;
pub mod completions;
pub mod get;
pub mod get_all;
pub mod list;
pub mod set;
pub mod show_path;
pub mod unset;
pub mod unset_all;

pub use add::AddCommand;
pub use completions::CompletionsCommand;
pub use get::GetCommand;
pub use get_all::GetAllCommand;
pub use list::ListCommand;
pub use set::SetCommand;
pub use show_path::ShowPathCommand;
pub use unset::UnsetCommand;
pub use unset_all::UnsetAllCommand;
