use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;

use splitbot::cli::{Cli, Commands};
use splitbot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, TelegramNotifier};
use splitcore::conversation::ConversationStore;
use splitcore::core::init_logger;
use splitcore::registry::{grant_admins, revoke_admin};
use splitcore::{BotConfig, RegistryStore};

/// Main entry point
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
/// Without a subcommand the bot is started.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    let cli = Cli::parse_args();
    let config = BotConfig::from_env();

    init_logger(&config.log_file, &config.log_level)?;

    let store = Arc::new(RegistryStore::new(config.data_file.clone()));

    match cli.command {
        Some(Commands::Run) | None => run_bot(config, store).await,
        Some(Commands::AddAdmin { id }) => {
            let added = grant_admins(&store, &[id]).await?;
            if added == 0 {
                println!("{} is already an admin", id);
            } else {
                println!("Granted admin rights to {}", id);
            }
            Ok(())
        }
        Some(Commands::RemoveAdmin { id }) => {
            if revoke_admin(&store, id).await? {
                println!("Revoked admin rights from {}", id);
            } else {
                println!("{} is not an admin", id);
            }
            Ok(())
        }
        Some(Commands::List) => print_registry(&store).await,
    }
}

async fn print_registry(store: &RegistryStore) -> Result<()> {
    let registry = store.load().await?;

    println!("Data file: {}", store.path().display());
    println!("Admins: {:?}", registry.admins);
    println!("Price: {}", registry.settings.price);
    println!("Link: {}", registry.settings.link);
    println!("Subscribers ({}):", registry.subscribers.len());
    for sub in &registry.subscribers {
        println!("  {} | {} | {}", sub.id, sub.name, sub.subs);
    }
    Ok(())
}

/// Run the Telegram bot with long polling until Ctrl+C.
async fn run_bot(config: BotConfig, store: Arc<RegistryStore>) -> Result<()> {
    log::info!("Starting bot with data file {}", store.path().display());

    if !config.admin_ids.is_empty() {
        let added = grant_admins(&store, &config.admin_ids).await?;
        log::info!("Merged {} admin id(s) from ADMIN_IDS", added);
    }

    let bot = create_bot(&config)?;

    match bot.get_me().await {
        Ok(me) => log::info!("Bot username: @{}", me.username()),
        Err(e) => {
            log::error!("Failed to reach Telegram API: {}", e);
            return Err(e.into());
        }
    }

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let notifier = Arc::new(TelegramNotifier::new(bot.clone()));
    let deps = HandlerDeps::new(store, ConversationStore::new(), notifier);

    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .error_handler(LoggingErrorHandler::with_custom_text("An error from the update handler"))
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
