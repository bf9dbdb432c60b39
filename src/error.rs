//! Fatal session errors. Each one ends the process with a `session failed: <reason>` line, so
//! every message renders on a single line.

use std::any::Any;

use thiserror::Error;

/// Conditions that end a session before or instead of a normal `Won`/`Quit`.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// Bevy reports a missing display or GPU adapter by panicking during plugin setup.
    #[error("session panicked: {0}")]
    Panicked(String),
    #[error("session ended abnormally with exit code {0}")]
    AbnormalExit(u8),
    #[error("failed to serialize level: {0}")]
    LevelDump(#[from] serde_json::Error),
}

impl SessionError {
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_owned(),
                Err(_) => "unknown panic".to_owned(),
            },
        };
        Self::Panicked(first_line(&message))
    }
}

impl From<clap::Error> for SessionError {
    fn from(err: clap::Error) -> Self {
        let message = err.to_string();
        let reason = first_line(&message);
        Self::InvalidArguments(reason.trim_start_matches("error: ").to_owned())
    }
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or_default().trim().to_owned()
}
