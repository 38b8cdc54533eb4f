//! Argument processing and validation
//!
//! Turns parsed flags plus the loaded configuration into an [`Invocation`].
//! Every check here runs before any client is built, so a rejected
//! invocation never touches the network.

use super::Cli;
use spush::config::ConfigManager;
use spush::errors::{AppError, AppResult};
use spush::pushbullet::AccessToken;

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Push { title: String, body: String },
    Account,
}

/// A validated command line
#[derive(Debug, Clone)]
pub struct Invocation {
    pub token: AccessToken,
    pub action: Action,
    pub dry_run: bool,
}

/// Handles argument processing and validation
pub struct ArgProcessor;

impl ArgProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Validate `cli` against `config`: API key first, then title, then body
    pub fn process(&self, cli: &Cli, config: &ConfigManager) -> AppResult<Invocation> {
        let token = self.resolve_token(cli.token.as_deref(), config)?;

        let action = if cli.account {
            Action::Account
        } else {
            let title = Self::non_empty("title", cli.title.as_deref(), "Title is empty")?;
            let body = Self::non_empty("body", cli.body.as_deref(), "Text is empty")?;
            Action::Push { title, body }
        };

        Ok(Invocation {
            token,
            action,
            dry_run: cli.dry_run,
        })
    }

    /// Flag (or `PUSHBULLET_TOKEN`) wins over the config file
    fn resolve_token(&self, flag: Option<&str>, config: &ConfigManager) -> AppResult<AccessToken> {
        let raw = match flag {
            Some(token) => token,
            None => config
                .access_token()
                .ok_or_else(|| AppError::missing_argument("--token"))?,
        };

        AccessToken::new(raw)
            .map_err(|_| AppError::invalid_argument("--token", "Pushbullet API key is empty"))
    }

    fn non_empty(argument: &str, value: Option<&str>, reason: &str) -> AppResult<String> {
        match value {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            Some(_) => Err(AppError::invalid_argument(argument, reason)),
            None => Err(AppError::missing_argument(argument)),
        }
    }
}

impl Default for ArgProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use spush::config::Config;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("spush").chain(args.iter().copied())).unwrap()
    }

    fn no_config() -> ConfigManager {
        ConfigManager::from_config(Config::default())
    }

    fn config_with_token(token: &str) -> ConfigManager {
        let mut config = Config::default();
        config.pushbullet.access_token = Some(token.to_string());
        ConfigManager::from_config(config)
    }

    #[test]
    fn test_valid_push() {
        let invocation = ArgProcessor::new()
            .process(&parse(&["-t", "abc123", "Hi", "there"]), &no_config())
            .unwrap();
        assert_eq!(invocation.token.expose(), "abc123");
        assert_eq!(
            invocation.action,
            Action::Push {
                title: "Hi".to_string(),
                body: "there".to_string()
            }
        );
        assert!(!invocation.dry_run);
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let err = ArgProcessor::new()
            .process(&parse(&["-t", "", "Hi", "there"]), &no_config())
            .unwrap_err();
        assert!(err.to_string().contains("Pushbullet API key is empty"));
    }

    #[test]
    fn test_missing_token_without_config() {
        let mut cli = parse(&["Hi", "there"]);
        cli.token = None;
        let err = ArgProcessor::new().process(&cli, &no_config()).unwrap_err();
        assert!(matches!(err, AppError::MissingArgument { .. }));
    }

    #[test]
    fn test_token_from_config() {
        let mut cli = parse(&["Hi", "there"]);
        cli.token = None;
        let invocation = ArgProcessor::new()
            .process(&cli, &config_with_token("o.from-file"))
            .unwrap();
        assert_eq!(invocation.token.expose(), "o.from-file");
    }

    #[test]
    fn test_flag_wins_over_config() {
        let invocation = ArgProcessor::new()
            .process(&parse(&["-t", "o.flag", "Hi", "there"]), &config_with_token("o.file"))
            .unwrap();
        assert_eq!(invocation.token.expose(), "o.flag");
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let err = ArgProcessor::new()
            .process(&parse(&["-t", "abc123", "", "there"]), &no_config())
            .unwrap_err();
        assert!(err.to_string().contains("Title is empty"));
    }

    #[test]
    fn test_empty_body_is_rejected() {
        let err = ArgProcessor::new()
            .process(&parse(&["-t", "abc123", "Hi", ""]), &no_config())
            .unwrap_err();
        assert!(err.to_string().contains("Text is empty"));
    }

    #[test]
    fn test_token_checked_before_title() {
        let err = ArgProcessor::new()
            .process(&parse(&["-t", "", "", ""]), &no_config())
            .unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_account_action() {
        let invocation = ArgProcessor::new()
            .process(&parse(&["-t", "abc123", "--account", "--dry-run"]), &no_config())
            .unwrap();
        assert_eq!(invocation.action, Action::Account);
        assert!(invocation.dry_run);
    }
}
