//! CLI subcommand definitions

use clap::Subcommand;

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Open the interactive chat (default)
    Chat,
    /// Send one message, wait for the reply and print the thread
    Send {
        /// Message text; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show or change the stored display name
    Name {
        #[command(subcommand)]
        command: Option<NameCommands>,
    },
    /// Show resolved settings and file locations
    Status,
}

#[derive(Subcommand)]
pub(crate) enum NameCommands {
    /// Print the stored name (default)
    Show,
    /// Store a new name (at least 2 characters)
    Set { name: String },
    /// Forget the stored name; the next chat asks again
    Reset,
}

/// Normalized command
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Chat,
    Send(String),
    ShowName,
    SetName(String),
    ResetName,
    Status,
}

impl From<Option<Commands>> for Action {
    fn from(cmd: Option<Commands>) -> Self {
        match cmd {
            None | Some(Commands::Chat) => Action::Chat,
            Some(Commands::Send { text }) => Action::Send(text.join(" ")),
            Some(Commands::Name { command }) => match command {
                None | Some(NameCommands::Show) => Action::ShowName,
                Some(NameCommands::Set { name }) => Action::SetName(name),
                Some(NameCommands::Reset) => Action::ResetName,
            },
            Some(Commands::Status) => Action::Status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn action(args: &[&str]) -> Action {
        let mut argv = vec!["chatline"];
        argv.extend_from_slice(args);
        Action::from(Cli::parse_from(argv).command)
    }

    #[test]
    fn no_subcommand_is_chat() {
        assert_eq!(action(&[]), Action::Chat);
        assert_eq!(action(&["chat"]), Action::Chat);
    }

    #[test]
    fn send_joins_words() {
        assert_eq!(
            action(&["send", "how", "are", "you?"]),
            Action::Send("how are you?".to_string())
        );
    }

    #[test]
    fn name_subcommands() {
        assert_eq!(action(&["name"]), Action::ShowName);
        assert_eq!(action(&["name", "show"]), Action::ShowName);
        assert_eq!(
            action(&["name", "set", "Alice"]),
            Action::SetName("Alice".to_string())
        );
        assert_eq!(action(&["name", "reset"]), Action::ResetName);
    }

    #[test]
    fn send_requires_text() {
        assert!(Cli::try_parse_from(["chatline", "send"]).is_err());
    }
}
