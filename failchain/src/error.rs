//! The lookup Error type for failchain

use crate::{Builder, ErrorKind, Impersonate};
use std::fmt;

/// Error returned when a field lookup on a chain fails.
///
/// - `kind`: which lookup failure occurred
/// - `name`: the field name that was requested (empty for
///   [`ErrorKind::InvalidFieldName`])
///
/// # Example
///
/// ```rust
/// use failchain::{ErrorKind, Failure};
///
/// let err = Failure::new("disk full");
/// let e = err.field("path").unwrap_err();
///
/// assert_eq!(e.kind(), ErrorKind::NoSuchField);
/// assert_eq!(e.name(), "path");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    name: String,
}

impl Error {
    /// Create a new error with the given kind and requested field name
    pub fn new(kind: ErrorKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Create a NoSuchField error
    pub fn no_such_field(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoSuchField, name)
    }

    /// Create an InvalidFieldName error
    pub fn invalid_field_name() -> Self {
        Self::new(ErrorKind::InvalidFieldName, "")
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the requested field name
    pub fn name(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// Display - compact, single-line format for logs
// =============================================================================

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.message())?;

        if !self.name.is_empty() {
            write!(f, " (name: {})", self.name)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        writeln!(f)?;
        writeln!(f, "    Message: {}", self.kind.message())?;

        if !self.name.is_empty() {
            writeln!(f, "    Field: {}", self.name)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

/// A lookup error becomes a node carrying its kind and the requested name.
impl Impersonate for Error {
    fn impersonate(&self, builder: Builder) -> Builder {
        let builder = builder
            .with_message(self.kind.message())
            .with_field("kind", self.kind.as_str());

        if self.name.is_empty() {
            builder
        } else {
            builder.with_field("name", self.name.as_str())
        }
    }
}
