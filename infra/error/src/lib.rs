//! # Error context
//!
//! Every error enum in the workspace gives each variant a
//! `context: Option<Cow<'static, str>>` slot. This crate holds the pieces
//! those enums share:
//!
//! * [`format_context`] renders the slot inside `#[error(..)]` messages.
//! * [`WithContext`] exposes the slot and prepends new context to it.
//! * [`context_ext!`] declares a crate's `...Ext` trait, giving any
//!   `Result` whose error converts into that crate's enum a `.context(..)`.
//!
//! ```rust
//! use pcitab_error::{Context, WithContext, format_context};
//!
//! #[derive(Debug, thiserror::Error)]
//! enum StoreError {
//!     #[error("Store failure{}: {source}", format_context(.context))]
//!     Io { source: std::io::Error, context: Context },
//! }
//!
//! impl From<std::io::Error> for StoreError {
//!     fn from(source: std::io::Error) -> Self {
//!         Self::Io { source, context: None }
//!     }
//! }
//!
//! impl WithContext for StoreError {
//!     fn context_mut(&mut self) -> &mut Context {
//!         match self {
//!             Self::Io { context, .. } => context,
//!         }
//!     }
//! }
//!
//! pcitab_error::context_ext!(StoreErrorExt => StoreError);
//!
//! let read: Result<(), std::io::Error> = Err(std::io::ErrorKind::NotFound.into());
//! let err = read.context("line 3").context("store.db").unwrap_err();
//! assert!(err.to_string().starts_with("Store failure (store.db: line 3)"));
//! ```

use std::borrow::Cow;

/// The context slot carried by every variant.
pub type Context = Option<Cow<'static, str>>;

/// Renders a context slot as ` (<context>)`, or nothing when empty.
#[must_use]
pub fn format_context(context: &Context) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// An error whose variants each carry a [`Context`].
pub trait WithContext: Sized {
    fn context_mut(&mut self) -> &mut Context;

    /// Prepends `context` to the existing one, joined with `": "`.
    #[must_use]
    fn with_context(mut self, context: impl Into<Cow<'static, str>>) -> Self {
        let outer = context.into();
        let slot = self.context_mut();
        *slot = Some(match slot.take() {
            Some(inner) => Cow::Owned(format!("{outer}: {inner}")),
            None => outer,
        });
        self
    }
}

/// Declares `$ext`, adding `.context(..)` to every `Result<T, E>` with `E: Into<$error>`.
///
/// `$error` must implement [`WithContext`].
#[macro_export]
macro_rules! context_ext {
    ($(#[$meta:meta])* $vis:vis $ext:ident => $error:ty) => {
        $(#[$meta])*
        $vis trait $ext<T> {
            /// Converts the error and prepends `context` to it.
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::std::result::Result<T, $error>;
        }

        impl<T, E: Into<$error>> $ext<T> for ::std::result::Result<T, E> {
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::std::result::Result<T, $error> {
                self.map_err(|e| $crate::WithContext::with_context(e.into(), context))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Tagged(Context);

    impl WithContext for Tagged {
        fn context_mut(&mut self) -> &mut Context {
            &mut self.0
        }
    }

    #[test]
    fn test_format_context() {
        assert_eq!(format_context(&None), "");
        assert_eq!(format_context(&Some("pci.ids".into())), " (pci.ids)");
    }

    #[test]
    fn test_with_context_nests_outermost_first() {
        let err = Tagged(None).with_context("line 4").with_context("db/pci.ids");
        assert_eq!(err, Tagged(Some("db/pci.ids: line 4".into())));
    }
}
