use std::fmt;
use std::time::Duration;

/// Centralized error type for the bot
#[derive(Debug)]
pub enum BotError {
    /// Telegram API errors
    Telegram(teloxide::RequestError),
    /// Filesystem errors
    Io(std::io::Error),
    /// The downloader binary could not be started
    DownloaderSpawn { command: String, source: std::io::Error },
    /// The downloader ran but exited with a non-zero status
    DownloaderFailed { code: Option<i32>, stderr: String },
    /// The downloader exceeded the job timeout and was killed
    DownloaderTimeout(Duration),
    /// Data parsing errors (callback payloads etc.)
    Parse(String),
    /// Generic error with a description
    General(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Telegram(e) => write!(f, "Telegram API error: {}", e),
            BotError::Io(e) => write!(f, "filesystem error: {}", e),
            BotError::DownloaderSpawn { command, source } => {
                write!(f, "failed to run {}: {}", command, source)
            }
            BotError::DownloaderFailed { code, stderr } => match code {
                Some(code) => write!(f, "downloader exited with code {}: {}", code, stderr),
                None => write!(f, "downloader killed by signal: {}", stderr),
            },
            BotError::DownloaderTimeout(limit) => {
                write!(f, "downloader did not finish within {:?}", limit)
            }
            BotError::Parse(msg) => write!(f, "parse error: {}", msg),
            BotError::General(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for BotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BotError::Telegram(e) => Some(e),
            BotError::Io(e) => Some(e),
            BotError::DownloaderSpawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::Telegram(err)
    }
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        BotError::Io(err)
    }
}

impl From<strum::ParseError> for BotError {
    fn from(err: strum::ParseError) -> Self {
        BotError::Parse(format!("enum parsing error: {}", err))
    }
}

impl BotError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

/// Result of bot operations
pub type BotResult<T> = Result<T, BotError>;

/// Result for handlers
pub type HandlerResult = BotResult<()>;
