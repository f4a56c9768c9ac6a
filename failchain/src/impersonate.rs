//! Adaptation of foreign errors into failure chains
//!
//! Any value that can be displayed can take part: implementing
//! [`Impersonate`] with no body wraps the display string in a single node,
//! overriding [`Impersonate::impersonate`] lets the type describe itself
//! with its own message, fields and inner chain.

use crate::{Builder, Failure};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Capability of an error to become a [`Failure`] chain.
///
/// # Example
///
/// ```rust
/// use failchain::{Builder, Failure, Impersonate};
/// use std::fmt;
///
/// struct HttpError {
///     status: u16,
/// }
///
/// impl fmt::Display for HttpError {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "http error {}", self.status)
///     }
/// }
///
/// impl Impersonate for HttpError {
///     fn impersonate(&self, builder: Builder) -> Builder {
///         builder.with_field("status", self.status)
///     }
/// }
///
/// let err = Failure::build("fetch failed")
///     .parent_of(&HttpError { status: 503 })
///     .done();
///
/// assert_eq!(failchain::field(&failchain::origin(&err), "status").unwrap(), 503);
/// ```
pub trait Impersonate: fmt::Display {
    /// Describe `self` on a builder seeded with `self.to_string()` as its
    /// message. The default keeps the builder untouched.
    fn impersonate(&self, builder: Builder) -> Builder {
        builder
    }

    /// Native chains return themselves here so adaptation keeps identity.
    #[doc(hidden)]
    fn as_failure(&self) -> Option<&Failure> {
        None
    }
}

/// Normalize an error into a chain.
///
/// A [`Failure`] comes back as the same chain; anything else goes through
/// its [`Impersonate`] implementation.
pub fn impersonate<E: Impersonate + ?Sized>(err: &E) -> Failure {
    if let Some(failure) = err.as_failure() {
        return failure.clone();
    }

    err.impersonate(Builder::new(err.to_string())).done()
}

/// A possibly absent error that can be adapted into a chain.
///
/// Every [`Impersonate`] type is present; `Option<T>` is absent when `None`.
pub trait Adapt {
    /// Adapt into a chain, `None` if absent
    fn adapt(&self) -> Option<Failure>;
}

impl<T: Impersonate + ?Sized> Adapt for T {
    fn adapt(&self) -> Option<Failure> {
        Some(impersonate(self))
    }
}

impl<T: Impersonate> Adapt for Option<T> {
    fn adapt(&self) -> Option<Failure> {
        self.as_ref().map(|err| impersonate(err))
    }
}

// =============================================================================
// Native chains
// =============================================================================

impl Impersonate for Failure {
    fn as_failure(&self) -> Option<&Failure> {
        Some(self)
    }
}

impl Impersonate for dyn StdError + 'static {
    fn as_failure(&self) -> Option<&Failure> {
        self.downcast_ref::<Failure>()
    }
}

impl Impersonate for dyn StdError + Send + Sync + 'static {
    fn as_failure(&self) -> Option<&Failure> {
        self.downcast_ref::<Failure>()
    }
}

// =============================================================================
// Pointers
// =============================================================================

macro_rules! impersonate_through {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: Impersonate + ?Sized> Impersonate for $ptr<T> {
                fn impersonate(&self, builder: Builder) -> Builder {
                    (**self).impersonate(builder)
                }

                fn as_failure(&self) -> Option<&Failure> {
                    (**self).as_failure()
                }
            }
        )*
    };
}

impersonate_through!(Box, Arc);

impl<T: Impersonate + ?Sized> Impersonate for &T {
    fn impersonate(&self, builder: Builder) -> Builder {
        (**self).impersonate(builder)
    }

    fn as_failure(&self) -> Option<&Failure> {
        (**self).as_failure()
    }
}

// =============================================================================
// Plain foreign errors - wrapped by their display string
// =============================================================================

impl Impersonate for std::io::Error {}
impl Impersonate for std::fmt::Error {}
impl Impersonate for std::num::ParseIntError {}
impl Impersonate for std::num::ParseFloatError {}
impl Impersonate for std::str::Utf8Error {}
impl Impersonate for serde_json::Error {}

// =============================================================================
// anyhow - every context layer becomes a node
// =============================================================================

impl Impersonate for anyhow::Error {
    fn impersonate(&self, builder: Builder) -> Builder {
        let mut messages = Vec::new();
        let mut tail = None;

        for cause in self.chain().skip(1) {
            if let Some(failure) = cause.downcast_ref::<Failure>() {
                tail = Some(failure.clone());
                break;
            }
            messages.push(cause.to_string());
        }

        let inner = messages.into_iter().rev().fold(tail, |inner, message| {
            Some(Builder::new(message).parent_of(&inner).done())
        });

        builder.parent_of(&inner)
    }

    fn as_failure(&self) -> Option<&Failure> {
        self.chain().next()?.downcast_ref::<Failure>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    struct Rewrite(&'static str);

    impl fmt::Display for Rewrite {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl Impersonate for Rewrite {
        fn impersonate(&self, builder: Builder) -> Builder {
            builder.with_field("message", "everything is wrong")
        }
    }

    struct Plain;

    impl fmt::Display for Plain {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "plain")
        }
    }

    impl Impersonate for Plain {}

    #[test]
    fn test_native_keeps_identity() {
        let err = Failure::new("boom");
        assert!(impersonate(&err).ptr_eq(&err));
        assert!(err.adapt().unwrap().ptr_eq(&err));
    }

    #[test]
    fn test_boxed_native_keeps_identity() {
        let err = Failure::new("boom");
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(err.clone());
        assert!(impersonate(&boxed).ptr_eq(&err));

        let dynamic: &(dyn StdError + 'static) = &err;
        assert!(impersonate(dynamic).ptr_eq(&err));
    }

    #[test]
    fn test_plain_wraps_display_string() {
        let node = impersonate(&Plain);
        assert_eq!(node.message(), "plain");
        assert!(node.fields().is_empty());
        assert_eq!(node.depth(), 1);

        let io = std::io::Error::other("disk full");
        let node = impersonate(&io);
        assert_eq!(node.message(), "disk full");
        assert_eq!(node.depth(), 1);
    }

    #[test]
    fn test_extended_rewrites_message() {
        let err = Failure::build("something went wrong")
            .parent_of(&Rewrite("something went terribly wrong"))
            .done();
        assert_eq!(err.origin().message(), "everything is wrong");
    }

    #[test]
    fn test_absent_adapts_to_none() {
        assert!(None::<Failure>.adapt().is_none());
        assert!(None::<&Plain>.adapt().is_none());
        assert!(Some(Plain).adapt().is_some());
    }

    #[test]
    fn test_anyhow_context_layers() {
        let err = Err::<(), _>(std::io::Error::other("disk full"))
            .context("writing cache")
            .context("saving session")
            .unwrap_err();

        let node = impersonate(&err);
        let messages: Vec<&str> = node.chain().map(Failure::message).collect();
        assert_eq!(messages, vec!["saving session", "writing cache", "disk full"]);
    }

    #[test]
    fn test_anyhow_native() {
        let failure = Failure::build("boom").with_field("id", 1).done();
        let err = anyhow::Error::new(failure.clone());
        assert!(impersonate(&err).ptr_eq(&failure));

        let err = err.context("while starting");
        let node = impersonate(&err);
        assert_eq!(node.message(), "while starting");
        assert!(node.inner().unwrap().ptr_eq(&failure));
    }
}
