use teloxide::types::BotCommand;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Balance,
    Start,
    Notify,
    NotifyOff,
    React,
    /// Exchange report, optionally for a single sender address.
    Cash(Option<String>),
    Scoring,
}

impl Command {
    /// Matches the start of `text` against the known commands. Anything after
    /// the command word is ignored except the sender address of `/cash`.
    pub fn parse(text: &str) -> Option<Self> {
        if text.starts_with("/balance") {
            Some(Command::Balance)
        } else if text.starts_with("/start") {
            Some(Command::Start)
        // `/notifyoff` also starts with `/notify`, so it has to be tested first.
        } else if text.starts_with("/notifyoff") {
            Some(Command::NotifyOff)
        } else if text.starts_with("/notify") {
            Some(Command::Notify)
        } else if text.starts_with("/react") {
            Some(Command::React)
        } else if text.starts_with("/cash") {
            let sender = text.split_whitespace().nth(1).map(ToOwned::to_owned);
            Some(Command::Cash(sender))
        } else if text.starts_with("/scoring") {
            Some(Command::Scoring)
        } else {
            None
        }
    }

    /// Entries for the client's command menu.
    pub fn menu() -> Vec<BotCommand> {
        vec![
            BotCommand::new("balance", "Show the current cashout balance"),
            BotCommand::new("notify", "Notify this chat when the balance changes"),
            BotCommand::new("notifyoff", "Stop balance notifications for this chat"),
            BotCommand::new("cash", "Exchange report, optionally for one sender address"),
            BotCommand::new("scoring", "Current scoring period and its deadline"),
            BotCommand::new("react", "React to the chat"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/balance"), Some(Command::Balance));
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/react now"), Some(Command::React));
        assert_eq!(Command::parse("/scoring"), Some(Command::Scoring));
        assert_eq!(Command::parse("/balance@cashout_bot"), Some(Command::Balance));
    }

    #[test]
    fn test_notifyoff_wins_over_notify() {
        assert_eq!(Command::parse("/notifyoff"), Some(Command::NotifyOff));
        assert_eq!(Command::parse("/notifyoff@cashout_bot"), Some(Command::NotifyOff));
        assert_eq!(Command::parse("/notify"), Some(Command::Notify));
        assert_eq!(Command::parse("/notify@cashout_bot"), Some(Command::Notify));
    }

    #[test]
    fn test_cash_argument() {
        assert_eq!(Command::parse("/cash"), Some(Command::Cash(None)));
        assert_eq!(
            Command::parse("/cash 5Abc extra"),
            Some(Command::Cash(Some("5Abc".to_owned())))
        );
        assert_eq!(
            Command::parse("/cash   5Abc"),
            Some(Command::Cash(Some("5Abc".to_owned())))
        );
    }

    #[test]
    fn test_unknown_text_is_ignored() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse("/help"), None);
        assert_eq!(Command::parse(" /balance"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_menu_names_parse() {
        for entry in Command::menu() {
            assert!(Command::parse(&format!("/{}", entry.command)).is_some());
        }
    }
}
