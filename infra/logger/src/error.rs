use pcitab_error::{Context, WithContext, context_ext, format_context};
use std::borrow::Cow;

/// Errors that can occur during logger initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The log file appender could not be created (e.g., unwritable directory).
    #[error("Log file appender error{}: {source}", format_context(.context))]
    Appender { source: tracing_appender::rolling::InitError, context: Context },

    /// The log directory could not be created.
    #[error("Log directory error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Context },

    /// A global tracing subscriber is already installed in this process.
    #[error("Tracing subscriber error{}: {source}", format_context(.context))]
    Subscriber { source: tracing_subscriber::util::TryInitError, context: Context },

    /// Invalid settings supplied to the logger builder.
    #[error("Invalid logger configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Context },
}

impl From<tracing_appender::rolling::InitError> for LoggerError {
    fn from(source: tracing_appender::rolling::InitError) -> Self {
        Self::Appender { source, context: None }
    }
}

impl From<tracing_subscriber::util::TryInitError> for LoggerError {
    fn from(source: tracing_subscriber::util::TryInitError) -> Self {
        Self::Subscriber { source, context: None }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, context: None }
    }
}

impl WithContext for LoggerError {
    fn context_mut(&mut self) -> &mut Context {
        match self {
            Self::Appender { context, .. }
            | Self::Io { context, .. }
            | Self::Subscriber { context, .. }
            | Self::InvalidConfiguration { context, .. } => context,
        }
    }
}

context_ext!(pub(crate) LoggerErrorExt => LoggerError);
