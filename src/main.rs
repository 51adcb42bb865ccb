use clap::Parser;
use mailinglist::config::Command;
use mailinglist::utils::logger::{self, LogFormat};
use mailinglist::utils::validation::Validate;
use mailinglist::{CliConfig, MailingListError, MailingListManager, TomlConfigSource};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    let format = if config.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, config.verbose);

    tracing::info!("Starting mailinglist CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Mailing list operation failed: {} (Kind: {:?})",
            e,
            e.kind()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(config: &CliConfig) -> Result<(), MailingListError> {
    config.validate()?;

    let source = TomlConfigSource::from_file(&config.config)?;
    let manager = MailingListManager::new(source)?;

    match &config.command {
        Command::Add {
            mailing_list,
            email,
        } => {
            manager.add(&config.profile, mailing_list, email).await?;
            println!("✅ Added {} to {}", email, mailing_list);
        }
        Command::Delete {
            mailing_list,
            email,
        } => {
            manager.delete(&config.profile, mailing_list, email).await?;
            println!("✅ Removed {} from {}", email, mailing_list);
        }
        Command::Members { mailing_list } => {
            let members = manager.get_members(&config.profile, mailing_list).await?;
            tracing::info!("📋 {} has {} members", mailing_list, members.len());
            for member in members {
                println!("{}", member);
            }
        }
    }

    Ok(())
}
