use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "splitbot")]
#[command(author, version, about = "Telegram bot that splits a shared subscription bill", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling (default)
    Run,

    /// Grant admin rights to a Telegram user id
    AddAdmin {
        /// Telegram user id
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Revoke admin rights from a Telegram user id
    RemoveAdmin {
        /// Telegram user id
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Print admins, subscribers and billing settings from the data file
    List,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["splitbot"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_add_admin_parses_id() {
        let cli = Cli::try_parse_from(["splitbot", "add-admin", "42"]).unwrap();
        assert_eq!(cli.command, Some(Commands::AddAdmin { id: 42 }));
    }

    #[test]
    fn test_remove_admin_requires_numeric_id() {
        assert!(Cli::try_parse_from(["splitbot", "remove-admin", "abc"]).is_err());
    }
}
