//! Configuration and CLI handling

pub mod cli;
pub mod settings;

pub use cli::{BitDepth, Cli};
pub use settings::Settings;
