//! CLI command implementations.
//!
//! - `show`: Merge sources and print the merged document
//! - `check`: Fail unless every required key is set
//! - `locate`: Print the file a path hint resolves to
//! - `set`: Update keys in an existing configuration file
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod completions;
pub mod locate;
pub mod set;
pub mod show;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use locate::LocateCommand;
pub use set::SetCommand;
pub use show::ShowCommand;
