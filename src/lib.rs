pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::{LocalStorage, MemoryStorage};
pub use app::commands::default_registry;
pub use config::toml_config::AppConfig;
pub use core::{
    collection::CollectionManager,
    dump::DumpManager,
    runner::{Runner, RunnerOptions},
};
pub use utils::console::StandardConsole;
pub use utils::error::{CollectionError, Result};
