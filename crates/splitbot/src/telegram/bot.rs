//! Bot initialization utilities
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command menu registration

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use splitcore::BotConfig;

/// Bot commands enum with descriptions
///
/// Commands without arguments still carry a `String`: trailing text such as
/// `/send_pay now` or a `/start` deep-link payload is accepted and ignored.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Я умею:")]
pub enum Command {
    #[command(description = "начать и показать кнопку «Подписаться»")]
    Start(String),
    #[command(description = "список команд")]
    Help(String),
    #[command(description = "добавить подписчика: /add_sub <id> <имя> <кол-во> (только для администраторов)")]
    AddSub(String),
    #[command(description = "удалить подписчика: /del_sub <id> (только для администраторов)")]
    DelSub(String),
    #[command(description = "общая сумма: /set_price <цена> (только для администраторов)")]
    SetPrice(String),
    #[command(description = "ссылка на оплату: /set_link <ссылка> (только для администраторов)")]
    SetLink(String),
    #[command(description = "разослать каждому его долю (только для администраторов)")]
    SendPay(String),
    #[command(description = "список подписчиков (только для администраторов)")]
    List(String),
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Missing token, invalid BOT_API_URL or HTTP client failure
pub fn create_bot(config: &BotConfig) -> anyhow::Result<Bot> {
    if config.bot_token.is_empty() {
        return Err(anyhow::anyhow!("BOT_TOKEN environment variable not set"));
    }

    let client = ClientBuilder::new().timeout(config.request_timeout).build()?;
    let bot = Bot::with_client(config.bot_token.clone(), client);

    let bot = match &config.bot_api_url {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            bot.set_api_url(url)
        }
        None => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_descriptions() {
        let commands = Command::descriptions().to_string();

        assert!(commands.contains("Я умею"));
        assert!(commands.contains("/add_sub"));
        assert!(commands.contains("/send_pay"));
        assert!(commands.contains("/list"));
    }

    #[test]
    fn test_parse_commands_with_arguments() {
        assert_eq!(
            Command::parse("/add_sub 123 Иван 2", "splitbot").unwrap(),
            Command::AddSub("123 Иван 2".to_string())
        );
        assert_eq!(
            Command::parse("/set_link https://pay.example", "splitbot").unwrap(),
            Command::SetLink("https://pay.example".to_string())
        );
        assert_eq!(
            Command::parse("/send_pay", "splitbot").unwrap(),
            Command::SendPay(String::new())
        );
    }

    #[test]
    fn test_trailing_arguments_are_tolerated() {
        assert!(matches!(
            Command::parse("/send_pay now", "splitbot").unwrap(),
            Command::SendPay(_)
        ));
        assert!(matches!(Command::parse("/list all", "splitbot").unwrap(), Command::List(_)));
        assert!(matches!(Command::parse("/start ref42", "splitbot").unwrap(), Command::Start(_)));
        assert!(matches!(Command::parse("/help me", "splitbot").unwrap(), Command::Help(_)));
    }

    #[test]
    fn test_create_bot_requires_token() {
        let config = BotConfig::from_lookup(|_| None);
        assert!(create_bot(&config).is_err());
    }
}
