//! Reporting chains through `tracing`
//!
//! Nothing in the core logs on its own. Callers that want a chain in their
//! logs hand it to [`report`], which emits one event per node.

use crate::Adapt;
use tracing::Level;

macro_rules! emit {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN => tracing::warn!($($field)*),
            Level::INFO => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            _ => tracing::trace!($($field)*),
        }
    };
}

/// Emit every node of `err` at `level`, head first.
///
/// Each event carries the node's `depth` (0 for the head), its `message` and
/// its `fields` as a JSON object. An absent error emits nothing.
pub fn report<E: Adapt + ?Sized>(err: &E, level: Level) {
    let Some(head) = err.adapt() else {
        return;
    };

    for (depth, node) in head.chain().enumerate() {
        let fields = serde_json::Value::Object(node.fields().clone());
        emit!(level, depth, message = node.message(), fields = %fields);
    }
}
