//! The Failure node chain

use crate::{Builder, Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Name of the reserved field aliasing a node's message.
///
/// Writing this field rewrites the message and reading it returns the
/// message; it never appears in [`Failure::fields`].
pub const MESSAGE_FIELD: &str = "message";

/// Named values attached to a single node
pub type Fields = serde_json::Map<String, Value>;

/// A single node as owned by a [`Builder`] before finalization.
#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct Node {
    pub(crate) message: String,
    #[serde(skip_serializing_if = "Fields::is_empty")]
    pub(crate) fields: Fields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) inner: Option<Failure>,
}

impl Node {
    fn with_inner(&self, inner: Option<Failure>) -> Node {
        Node {
            message: self.message.clone(),
            fields: self.fields.clone(),
            inner,
        }
    }
}

/// Unlinks uniquely owned descendants one at a time, so dropping a long
/// chain does not recurse once per node.
impl Drop for Node {
    fn drop(&mut self) {
        let mut next = self.inner.take();
        while let Some(failure) = next {
            next = match Arc::into_inner(failure.0) {
                Some(mut node) => node.inner.take(),
                None => None,
            };
        }
    }
}

/// A finalized, immutable chain of error nodes.
///
/// Each node carries:
/// - `message`: human-readable description (may be empty)
/// - `fields`: named values for debugging and matching
/// - `inner`: the error this one was caused by (if any)
///
/// Cloning a `Failure` shares the same nodes, so clones are identical to
/// each other; use [`Failure::copy`] for an independent structural copy.
///
/// # Example
///
/// ```rust
/// use failchain::Failure;
///
/// let cause = Failure::build("connection refused")
///     .with_field("port", 5432)
///     .done();
///
/// let err = Failure::build("database unavailable")
///     .with_field("retries", 3)
///     .parent_of(&cause)
///     .done();
///
/// assert_eq!(err.depth(), 2);
/// assert!(err.is_parent_of(Some(&cause)));
/// assert_eq!(err.origin().field("port").unwrap(), 5432);
/// ```
#[derive(Clone)]
pub struct Failure(Arc<Node>);

impl Failure {
    /// Create a single-node failure with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Builder::new(message).done()
    }

    /// Start building a failure with the given message
    pub fn build(message: impl Into<String>) -> Builder {
        Builder::new(message)
    }

    pub(crate) fn from_node(node: Node) -> Self {
        Failure(Arc::new(node))
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the message of this node
    pub fn message(&self) -> &str {
        &self.0.message
    }

    /// Get the fields of this node
    pub fn fields(&self) -> &Fields {
        &self.0.fields
    }

    /// Get the inner node (if any)
    pub fn inner(&self) -> Option<&Failure> {
        self.0.inner.as_ref()
    }

    /// Iterate over this node and all of its descendants, head first
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Look up a field by name.
    ///
    /// `"message"` always resolves to the node's message. An empty name is
    /// rejected with [`ErrorKind::InvalidFieldName`](crate::ErrorKind).
    pub fn field(&self, name: &str) -> Result<Value> {
        if name.is_empty() {
            return Err(Error::invalid_field_name());
        }

        if name == MESSAGE_FIELD {
            return Ok(Value::String(self.0.message.clone()));
        }

        self.0
            .fields
            .get(name)
            .cloned()
            .ok_or_else(|| Error::no_such_field(name))
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// The deepest node of the chain; a node without inner is its own origin
    pub fn origin(&self) -> &Failure {
        let mut node = self;
        while let Some(inner) = node.inner() {
            node = inner;
        }
        node
    }

    /// Number of nodes from this one to the origin, inclusive
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// Check whether `candidate` is a strict descendant of this node.
    ///
    /// Every chain terminates, so any node is a parent of `None`. A node is
    /// never a parent of itself.
    pub fn is_parent_of(&self, candidate: Option<&Failure>) -> bool {
        match candidate {
            None => true,
            Some(candidate) => self.chain().skip(1).any(|node| node.ptr_eq(candidate)),
        }
    }

    /// Check whether both handles point to the very same node
    pub fn ptr_eq(&self, other: &Failure) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Structural equality: same length, and equal messages and fields at
    /// every position.
    pub fn same(&self, other: &Failure) -> bool {
        let mut left = Some(self);
        let mut right = Some(other);

        while let (Some(l), Some(r)) = (left, right) {
            if l.ptr_eq(r) {
                return true;
            }

            if l.0.message != r.0.message || l.0.fields != r.0.fields {
                return false;
            }

            left = l.inner();
            right = r.inner();
        }

        left.is_none() && right.is_none()
    }

    /// Shallow equality: head messages only
    pub fn like(&self, other: &Failure) -> bool {
        self.ptr_eq(other) || self.0.message == other.0.message
    }

    // =========================================================================
    // Copy
    // =========================================================================

    /// Deep copy with fresh nodes and field maps at every level
    pub fn copy(&self) -> Failure {
        Failure::from_node(self.copy_node())
    }

    pub(crate) fn copy_node(&self) -> Node {
        let descendants: Vec<&Failure> = self.chain().skip(1).collect();
        let inner = descendants.into_iter().rev().fold(None, |inner, node| {
            Some(Failure::from_node(node.0.with_inner(inner)))
        });
        self.0.with_inner(inner)
    }
}

/// Iterator over a chain, see [`Failure::chain`]
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a Failure>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Failure;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.inner();
        Some(node)
    }
}

// =============================================================================
// Display - compact JSON document
// =============================================================================

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(&*self.0).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message())?;
        write_fields(f, self.fields(), "    ")?;

        if self.inner().is_some() {
            writeln!(f)?;
            writeln!(f, "Caused by:")?;
            for (i, node) in self.chain().skip(1).enumerate() {
                writeln!(f, "    {}: {}", i, node.message())?;
                write_fields(f, node.fields(), "        ")?;
            }
        }

        Ok(())
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &Fields, indent: &str) -> fmt::Result {
    for (name, value) in fields {
        writeln!(f, "{}{}: {}", indent, name, value)?;
    }
    Ok(())
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner().map(|inner| inner as &(dyn std::error::Error + 'static))
    }
}

// =============================================================================
// Serde - the same document as Display, rebuilt through the Builder
// =============================================================================

impl Serialize for Failure {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    message: String,
    #[serde(default)]
    fields: Fields,
    #[serde(default)]
    inner: Option<Box<Document>>,
}

impl Document {
    fn into_failure(self, inner: Option<&Failure>) -> Failure {
        Builder::new(self.message)
            .with_fields(self.fields)
            .parent_of(&inner)
            .done()
    }
}

impl From<Document> for Failure {
    fn from(mut doc: Document) -> Self {
        let mut outer = Vec::new();
        while let Some(inner) = doc.inner.take() {
            outer.push(std::mem::replace(&mut doc, *inner));
        }

        let origin = doc.into_failure(None);
        outer
            .into_iter()
            .rev()
            .fold(origin, |inner, layer| layer.into_failure(Some(&inner)))
    }
}

impl<'de> Deserialize<'de> for Failure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Document::deserialize(deserializer).map(Failure::from)
    }
}

/// Parses the [`Display`](fmt::Display) document back into a chain.
///
/// Each inner node is one more level of JSON nesting, so the recursion limit
/// of `serde_json` is lifted here and chains of any depth parse back.
impl FromStr for Failure {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut deserializer = serde_json::Deserializer::from_str(s);
        deserializer.disable_recursion_limit();
        let failure = Failure::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(failure)
    }
}
