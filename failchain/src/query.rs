//! Free functions over any adaptable error
//!
//! Every function here adapts its arguments with [`Adapt`] first, so native
//! chains, foreign errors and absent (`None`) errors are all accepted.

use crate::{Adapt, Builder, Error, Failure, Result};
use serde_json::Value;
use std::fmt;

// =============================================================================
// Constructors
// =============================================================================

/// Create a single-node failure with the given message
pub fn new(message: impl Into<String>) -> Failure {
    Failure::new(message)
}

/// Create a single-node failure from format arguments, see [`failure!`](crate::failure)
pub fn newf(args: fmt::Arguments<'_>) -> Failure {
    buildf(args).done()
}

/// Start a builder with the given message
pub fn build(message: impl Into<String>) -> Builder {
    Builder::new(message)
}

/// Start a builder with a message from format arguments, see [`build!`](crate::build)
pub fn buildf(args: fmt::Arguments<'_>) -> Builder {
    Builder::new(fmt::format(args))
}

/// Start a builder seeded with a deep copy of `err`.
///
/// # Panics
/// Panics if `err` is absent.
pub fn buildc<E: Adapt + ?Sized>(err: &E) -> Builder {
    Builder::from_copy(err)
}

// =============================================================================
// Fields
// =============================================================================

/// Look up a field of `err` by name
pub fn field<E: Adapt + ?Sized>(err: &E, name: &str) -> Result<Value> {
    match err.adapt() {
        Some(node) => node.field(name),
        None => Err(Error::no_such_field(name)),
    }
}

/// Look up a field of `err`, falling back to `default` on any lookup error
pub fn field_or_default<E: Adapt + ?Sized>(
    err: &E,
    name: &str,
    default: impl Into<Value>,
) -> Value {
    field(err, name).unwrap_or_else(|_| default.into())
}

/// Check that `err` has a field `name` equal to `value`
pub fn test_field<E: Adapt + ?Sized>(err: &E, name: &str, value: impl Into<Value>) -> bool {
    let value = value.into();
    field(err, name).is_ok_and(|v| v == value)
}

/// Check that `err` or any of its descendants has a field `name` equal to `value`
pub fn test_field_recursively<E: Adapt + ?Sized>(
    err: &E,
    name: &str,
    value: impl Into<Value>,
) -> bool {
    let value = value.into();

    err.adapt().is_some_and(|head| {
        head.chain()
            .any(|node| node.field(name).is_ok_and(|v| v == value))
    })
}

// =============================================================================
// Traversal
// =============================================================================

/// The inner error of `err`
pub fn inner<E: Adapt + ?Sized>(err: &E) -> Option<Failure> {
    err.adapt()?.inner().cloned()
}

/// The deepest inner error of `err`
pub fn origin<E: Adapt + ?Sized>(err: &E) -> Option<Failure> {
    err.adapt().map(|node| node.origin().clone())
}

/// Number of nodes in the chain of `err`, 0 if absent
pub fn depth<E: Adapt + ?Sized>(err: &E) -> usize {
    err.adapt().map_or(0, |node| node.depth())
}

/// Check whether `candidate` is a strict descendant of `err`.
///
/// An absent `err` is never a parent; a present one is always a parent of
/// an absent `candidate`.
pub fn is_parent_of<E, C>(err: &E, candidate: &C) -> bool
where
    E: Adapt + ?Sized,
    C: Adapt + ?Sized,
{
    match err.adapt() {
        Some(node) => node.is_parent_of(candidate.adapt().as_ref()),
        None => false,
    }
}

// =============================================================================
// Comparison
// =============================================================================

/// Structural equality of two chains, see [`Failure::same`]
pub fn same<A, B>(a: &A, b: &B) -> bool
where
    A: Adapt + ?Sized,
    B: Adapt + ?Sized,
{
    match (a.adapt(), b.adapt()) {
        (None, None) => true,
        (Some(a), Some(b)) => a.same(&b),
        _ => false,
    }
}

/// Equality of head messages, see [`Failure::like`]
pub fn like<A, B>(a: &A, b: &B) -> bool
where
    A: Adapt + ?Sized,
    B: Adapt + ?Sized,
{
    match (a.adapt(), b.adapt()) {
        (None, None) => true,
        (Some(a), Some(b)) => a.like(&b),
        _ => false,
    }
}

/// The message of `err`.
///
/// # Panics
/// Panics if `err` is absent.
pub fn message<E: Adapt + ?Sized>(err: &E) -> String {
    match err.adapt() {
        Some(node) => node.message().to_owned(),
        None => panic!("failchain: message of an absent error"),
    }
}
