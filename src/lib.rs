// Public API
pub mod cli;
pub mod commands;

// Core: Desktopfile evaluation and shell activation
pub mod activate;
pub mod dsl;
pub mod environment;
pub mod launcher;
pub mod platform;
pub mod script;

// Collaborators
mod config;
mod store;
mod ui;
mod util;

// Re-export main types
pub use activate::{Activation, ActivationError};
pub use config::Config;
pub use dsl::DslError;
pub use environment::{Configuration, Environment};
pub use launcher::{LaunchError, Launcher};
pub use platform::OsClass;
pub use script::{render, ShellScript};
pub use store::{Store, StoreError, WorkspaceRecord};
