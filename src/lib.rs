pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{ProfileConfiguration, TomlConfigSource};
pub use crate::core::{
    manager::{ConnectorRegistry, MailingListManager},
    redirection::OvhRedirectConnector,
    subscriber::OvhSubscriberConnector,
};
pub use crate::domain::ports::{ConfigurationSource, MailingListConnector};
pub use crate::utils::error::{ErrorKind, MailingListError, Result};
