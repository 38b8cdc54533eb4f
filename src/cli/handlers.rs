//! Command handlers
//!
//! Validated invocations are either rendered (`--dry-run`) or sent through
//! a [`NoteSender`].

use super::args::{Action, ArgProcessor, Invocation};
use super::{Cli, CliContext};
use spush::errors::AppResult;
use spush::pushbullet::NoteMessage;
use spush::shared::clients::{create_async_client_from_config, NoteSender};
use tracing::{debug, info};

/// Line printed after a successful push
pub const PUSH_SUCCESS: &str = "spush: note pushed";

/// Coordinates command handling with dependency injection via CliContext
pub struct CommandHandler {
    context: CliContext,
}

impl CommandHandler {
    pub fn new(context: CliContext) -> Self {
        Self { context }
    }

    /// Validate the command line, then send (or render) the request
    pub async fn handle_command(&self, cli: Cli) -> AppResult<()> {
        let invocation = ArgProcessor::new().process(&cli, &self.context.config_manager)?;
        let output = if invocation.dry_run {
            self.render(&invocation)?
        } else {
            let client = create_async_client_from_config(
                invocation.token.clone(),
                &self.context.config_manager.config().pushbullet,
            )?;
            self.run(&client, &invocation.action).await?
        };

        println!("{output}");
        Ok(())
    }

    /// Perform `action` with `sender`, returning the text to print
    pub async fn run(&self, sender: &dyn NoteSender, action: &Action) -> AppResult<String> {
        match action {
            Action::Push { title, body } => {
                let response = sender.push_note(title, body).await?;
                debug!("Push response: {response}");
                info!("Note pushed");
                Ok(PUSH_SUCCESS.to_string())
            }
            Action::Account => Ok(sender.fetch_account_info().await?),
        }
    }

    /// Describe the request `invocation` would send
    fn render(&self, invocation: &Invocation) -> AppResult<String> {
        let client = create_async_client_from_config(
            invocation.token.clone(),
            &self.context.config_manager.config().pushbullet,
        )?;
        let request = match &invocation.action {
            Action::Push { title, body } => client.requests().push_note(&NoteMessage::new(title, body))?,
            Action::Account => client.requests().account_info()?,
        };
        Ok(format!("Dry run - would send:\n{}", request.describe().trim_end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use spush::config::{Config, ConfigManager};
    use spush::errors::{AppError, PushError};
    use spush::pushbullet::AccessToken;
    use std::sync::Mutex;

    /// Records calls and answers with a canned result
    struct FakeSender {
        result: Result<String, PushError>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSender {
        fn answering(result: Result<String, PushError>) -> Self {
            Self {
                result,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl NoteSender for FakeSender {
        async fn push_note(&self, title: &str, body: &str) -> Result<String, PushError> {
            self.calls.lock().unwrap().push(format!("push {title}/{body}"));
            self.result.clone()
        }

        async fn fetch_account_info(&self) -> Result<String, PushError> {
            self.calls.lock().unwrap().push("account".to_string());
            self.result.clone()
        }
    }

    fn handler() -> CommandHandler {
        CommandHandler::new(CliContext::from_manager(
            ConfigManager::from_config(Config::default()),
            false,
        ))
    }

    fn push(title: &str, body: &str) -> Action {
        Action::Push {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_push_success_message() {
        let sender = FakeSender::answering(Ok("{}".to_string()));
        let output = handler().run(&sender, &push("Hi", "there")).await.unwrap();
        assert_eq!(output, PUSH_SUCCESS);
        assert_eq!(*sender.calls.lock().unwrap(), vec!["push Hi/there".to_string()]);
    }

    #[tokio::test]
    async fn test_push_failure_is_propagated() {
        let sender = FakeSender::answering(Err(PushError::invalid_api_key(401)));
        let err = handler().run(&sender, &push("Hi", "there")).await.unwrap_err();
        assert!(matches!(err, AppError::Push(PushError::Auth { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_account_prints_body() {
        let sender = FakeSender::answering(Ok(r#"{"email":"me@example.com"}"#.to_string()));
        let output = handler().run(&sender, &Action::Account).await.unwrap();
        assert!(output.contains("me@example.com"));
        assert_eq!(*sender.calls.lock().unwrap(), vec!["account".to_string()]);
    }

    #[test]
    fn test_render_push_request() {
        let invocation = Invocation {
            token: AccessToken::new("abc123").unwrap(),
            action: push("Hi", "there"),
            dry_run: true,
        };
        let text = handler().render(&invocation).unwrap();
        assert!(text.contains("POST https://api.pushbullet.com/v2/pushes"));
        assert!(text.contains(r#"{"type":"note","title":"Hi","body":"there"}"#));
        assert!(!text.contains("abc123"));
    }
}
