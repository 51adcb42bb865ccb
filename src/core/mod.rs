pub mod executor;
pub mod manager;
pub mod ovh;
pub mod path;
pub mod redirection;
pub mod signer;
pub mod subscriber;

pub use crate::domain::model::{MailingListAddress, RedirectionRecord};
pub use crate::domain::ports::{ConfigurationSource, MailingListConnector};
pub use crate::utils::error::Result;
