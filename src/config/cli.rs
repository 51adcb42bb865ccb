use crate::domain::model::MailingListAddress;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "mailinglist")]
#[command(about = "Manage mailing list members through OVH-style APIs")]
pub struct CliConfig {
    #[arg(long, default_value = "mailinglist.toml", help = "TOML file holding mailinglist.<profile>.* keys")]
    pub config: String,

    #[arg(long, short, help = "Profile name to use")]
    pub profile: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a member to a mailing list
    Add { mailing_list: String, email: String },
    /// Remove a member from a mailing list
    Delete { mailing_list: String, email: String },
    /// List the members of a mailing list
    Members { mailing_list: String },
}

impl Command {
    pub fn mailing_list(&self) -> &str {
        match self {
            Command::Add { mailing_list, .. }
            | Command::Delete { mailing_list, .. }
            | Command::Members { mailing_list } => mailing_list,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("profile", &self.profile)?;
        MailingListAddress::parse(self.command.mailing_list())?;
        match &self.command {
            Command::Add { email, .. } | Command::Delete { email, .. } => {
                validate_non_empty_string("email", email)
            }
            Command::Members { .. } => Ok(()),
        }
    }
}
