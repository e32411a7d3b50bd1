use pcitab_error::{Context, WithContext, context_ext, format_context};

/// Errors raised while writing a device table.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Table write failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Context },
}

impl From<std::io::Error> for EmitError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, context: None }
    }
}

impl WithContext for EmitError {
    fn context_mut(&mut self) -> &mut Context {
        match self {
            Self::Io { context, .. } => context,
        }
    }
}

context_ext!(pub EmitErrorExt => EmitError);
