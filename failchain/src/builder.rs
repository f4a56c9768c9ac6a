//! Fluent construction of a chain head

use crate::node::{Node, MESSAGE_FIELD};
use crate::{Adapt, Failure, Fields};
use serde_json::Value;
use std::fmt;

/// Builds a single [`Failure`] node, optionally on top of an inner chain.
///
/// Every method takes the builder by value and returns it, so calls chain.
/// [`Builder::done`] consumes the builder: once a failure is finalized
/// nothing can mutate it.
///
/// # Example
///
/// ```rust
/// use failchain::Builder;
///
/// let err = Builder::new("upload failed")
///     .with_field("bucket", "assets")
///     .with_fields([("attempt", 3), ("max_attempts", 3)])
///     .parent_of(&std::io::Error::other("broken pipe"))
///     .done();
///
/// assert_eq!(err.field("attempt").unwrap(), 3);
/// assert_eq!(err.inner().unwrap().message(), "broken pipe");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    node: Node,
}

impl Builder {
    /// Start a builder for a node with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            node: Node {
                message: message.into(),
                fields: Fields::new(),
                inner: None,
            },
        }
    }

    /// Start a builder seeded with a deep copy of `err`.
    ///
    /// The copy is independent: nothing done to this builder affects `err`.
    ///
    /// # Panics
    /// Panics if `err` is absent.
    pub fn from_copy<E: Adapt + ?Sized>(err: &E) -> Self {
        let source = err
            .adapt()
            .unwrap_or_else(|| panic!("failchain: cannot copy an absent error"));

        Self {
            node: source.copy_node(),
        }
    }

    /// Set a field.
    ///
    /// An empty name is ignored. The name `"message"` rewrites the message
    /// with the value's string form instead of adding a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();

        if name.is_empty() {
            return self;
        }

        let value = value.into();

        if name == MESSAGE_FIELD {
            self.node.message = value_to_message(value);
        } else {
            self.node.fields.insert(name, value);
        }

        self
    }

    /// Set every field of `fields`, see [`Builder::with_field`]
    pub fn with_fields<I, K, V>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        fields
            .into_iter()
            .fold(self, |builder, (name, value)| builder.with_field(name, value))
    }

    /// Set the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.node.message = message.into();
        self
    }

    /// Set the message from format arguments
    pub fn with_message_fmt(self, args: fmt::Arguments<'_>) -> Self {
        self.with_message(fmt::format(args))
    }

    /// Make the node a parent of `inner`, replacing any previous inner.
    ///
    /// `inner` is adapted first, so any supported error (or an absent one)
    /// can be attached.
    pub fn parent_of<E: Adapt + ?Sized>(mut self, inner: &E) -> Self {
        self.node.inner = inner.adapt();
        self
    }

    /// Finalize the node
    pub fn done(self) -> Failure {
        Failure::from_node(self.node)
    }
}

fn value_to_message(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_field() {
        let err = Builder::new("boom")
            .with_field("a", 1)
            .with_field("b", "2")
            .with_field("a", 3)
            .done();

        assert_eq!(err.fields().len(), 2);
        assert_eq!(err.field("a").unwrap(), 3);
        assert_eq!(err.field("b").unwrap(), "2");
    }

    #[test]
    fn test_message_field_rewrites_message() {
        let err = Builder::new("boom").with_field("message", "bang").done();
        assert_eq!(err.message(), "bang");
        assert!(err.fields().is_empty());

        let by_field = Builder::new("boom").with_field("message", 42).done();
        let by_message = Builder::new("boom").with_message(42.to_string()).done();
        assert!(by_field.same(&by_message));
        assert!(!by_field.fields().contains_key(MESSAGE_FIELD));
    }

    #[test]
    fn test_empty_name_is_ignored() {
        let err = Builder::new("boom").with_field("", 1).done();
        assert!(err.same(&Failure::new("boom")));
    }

    #[test]
    fn test_with_fields() {
        let mut fields = Fields::new();
        fields.insert("a".to_string(), json!(1));
        fields.insert("b".to_string(), json!("2"));
        fields.insert("".to_string(), json!(true));
        fields.insert("message".to_string(), json!("renamed"));

        let err = Builder::new("boom").with_fields(fields).done();

        assert_eq!(err.message(), "renamed");
        assert_eq!(err.fields().len(), 2);
        assert_eq!(err.field("a").unwrap(), 1);
        assert_eq!(err.field("b").unwrap(), "2");
    }

    #[test]
    fn test_with_fields_empty_is_noop() {
        let plain = Failure::new("boom");

        let err = Builder::new("boom").with_fields(Fields::new()).done();
        assert!(err.same(&plain));

        let err = Builder::new("boom")
            .with_fields(None::<Fields>.into_iter().flatten())
            .done();
        assert!(err.same(&plain));
    }

    #[test]
    fn test_with_message_fmt() {
        let err = Builder::new("")
            .with_message_fmt(format_args!("{} went {}", "something", "wrong"))
            .done();
        assert_eq!(err.message(), "something went wrong");
    }

    #[test]
    fn test_parent_of_replaces_inner() {
        let first = Failure::new("first");
        let second = Failure::new("second");

        let err = Builder::new("outer")
            .parent_of(&first)
            .parent_of(&second)
            .done();
        assert!(err.inner().unwrap().ptr_eq(&second));

        let err = Builder::new("outer")
            .parent_of(&first)
            .parent_of(&None::<Failure>)
            .done();
        assert!(err.inner().is_none());
    }

    #[test]
    fn test_from_copy_is_independent() {
        let inner = Failure::build("inner").with_field("id", 1).done();
        let source = Failure::build("outer")
            .with_field("id", 0)
            .parent_of(&inner)
            .done();

        let copy = Builder::from_copy(&source)
            .with_field("id", 9)
            .with_field("extra", true)
            .done();

        assert_eq!(source.field("id").unwrap(), 0);
        assert!(!source.fields().contains_key("extra"));
        assert_eq!(copy.field("id").unwrap(), 9);
        assert!(copy.inner().unwrap().same(&inner));
        assert!(!copy.inner().unwrap().ptr_eq(&inner));
    }

    #[test]
    fn test_from_copy_unchanged_is_same() {
        let source = Failure::build("outer")
            .with_field("id", 5)
            .parent_of(&Failure::new("inner"))
            .done();
        assert!(Builder::from_copy(&source).done().same(&source));
    }

    #[test]
    #[should_panic(expected = "absent")]
    fn test_from_copy_of_absent_panics() {
        let _ = Builder::from_copy(&None::<Failure>);
    }
}
