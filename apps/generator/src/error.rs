use pcitab_error::{Context, WithContext, context_ext, format_context};
use std::borrow::Cow;

/// Errors that abort a generation run.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Database error{}: {source}", format_context(.context))]
    Ids { source: pcitab_ids::IdsError, context: Context },

    #[error("Emission error{}: {source}", format_context(.context))]
    Emit { source: pcitab_emitter::EmitError, context: Context },

    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Context },

    #[error("Output I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Context },

    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfig { message: Cow<'static, str>, context: Context },

    #[error("Vendor '{vendor}' not found in database{}", format_context(.context))]
    UnknownVendor { vendor: String, context: Context },
}

impl GeneratorError {
    pub(crate) fn invalid_config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidConfig { message: message.into(), context: None }
    }
}

impl From<pcitab_ids::IdsError> for GeneratorError {
    fn from(source: pcitab_ids::IdsError) -> Self {
        Self::Ids { source, context: None }
    }
}

impl From<pcitab_emitter::EmitError> for GeneratorError {
    fn from(source: pcitab_emitter::EmitError) -> Self {
        Self::Emit { source, context: None }
    }
}

impl From<std::io::Error> for GeneratorError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, context: None }
    }
}

impl WithContext for GeneratorError {
    fn context_mut(&mut self) -> &mut Context {
        match self {
            Self::Ids { context, .. }
            | Self::Emit { context, .. }
            | Self::Config { context, .. }
            | Self::Io { context, .. }
            | Self::InvalidConfig { context, .. }
            | Self::UnknownVendor { context, .. } => context,
        }
    }
}

context_ext!(
    /// Adds `.context(..)` to results whose error converts into [`GeneratorError`].
    pub GeneratorErrorExt => GeneratorError
);
