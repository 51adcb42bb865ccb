#[cfg(feature = "cli")]
pub mod cli;
pub mod profile;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use profile::ProfileConfiguration;
pub use toml_config::TomlConfigSource;
