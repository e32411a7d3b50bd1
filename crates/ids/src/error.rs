use pcitab_error::{Context, WithContext, context_ext, format_context};

/// Errors raised while reading or parsing a `pci.ids` database.
#[derive(Debug, thiserror::Error)]
pub enum IdsError {
    /// The database could not be opened or read (including invalid UTF-8).
    #[error("Database I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Context },

    /// The input violates the three-level nesting of the database format.
    #[error("Structural error at line {line}{}: {violation}", format_context(.context))]
    Structural { line: usize, violation: Violation, context: Context },
}

/// The nesting invariant a malformed line broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("device line without an active vendor")]
    OrphanDevice,

    #[error("subdevice line without an active device")]
    OrphanSubdevice,

    #[error("duplicate vendor id '{id}'")]
    DuplicateVendor { id: String },

    #[error("duplicate device id '{id}' under vendor '{vendor}'")]
    DuplicateDevice { vendor: String, id: String },

    #[error("missing {field}")]
    MissingField { field: &'static str },

    #[error("indentation depth {depth} exceeds subdevice level")]
    TooDeep { depth: usize },
}

impl IdsError {
    pub(crate) const fn structural(line: usize, violation: Violation) -> Self {
        Self::Structural { line, violation, context: None }
    }

    /// Returns the violated invariant for structural failures.
    #[must_use]
    pub const fn violation(&self) -> Option<&Violation> {
        match self {
            Self::Structural { violation, .. } => Some(violation),
            Self::Io { .. } => None,
        }
    }
}

impl From<std::io::Error> for IdsError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, context: None }
    }
}

impl WithContext for IdsError {
    fn context_mut(&mut self) -> &mut Context {
        match self {
            Self::Io { context, .. } | Self::Structural { context, .. } => context,
        }
    }
}

context_ext!(
    /// Adds `.context(..)` to results that convert into [`IdsError`].
    pub IdsErrorExt => IdsError
);
