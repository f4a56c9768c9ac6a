//! Error kinds for failchain lookups

use std::fmt;

/// The kind of lookup failure that occurred.
///
/// Both kinds are recoverable: [`field_or_default`](crate::field_or_default)
/// absorbs them, everything else returns them as ordinary `Err` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The requested field is not present on the node
    NoSuchField,

    /// The requested field name is empty
    InvalidFieldName,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoSuchField => "NoSuchField",
            ErrorKind::InvalidFieldName => "InvalidFieldName",
        }
    }

    /// Fixed human-readable text for this kind
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::NoSuchField => "failchain: no such field",
            ErrorKind::InvalidFieldName => "failchain: invalid field name",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::NoSuchField.to_string(), "NoSuchField");
        assert_eq!(ErrorKind::InvalidFieldName.to_string(), "InvalidFieldName");
    }

    #[test]
    fn test_error_kind_message() {
        assert_eq!(ErrorKind::NoSuchField.message(), "failchain: no such field");
        assert_eq!(
            ErrorKind::InvalidFieldName.message(),
            "failchain: invalid field name"
        );
    }
}
