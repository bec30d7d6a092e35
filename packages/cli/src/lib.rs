//! Wortschatz command-line collaborator of the review scheduler: loads the
//! vocabulary and the progress file, runs the scheduler, writes the map back.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod vocabulary;

pub use commands::App;
pub use config::{Config, PolicyKind};
pub use error::{CliError, CliResult};
