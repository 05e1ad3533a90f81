use std::collections::HashMap;

use crate::import::Import;
use crate::selector::Identifier;

/// Contract for an external source of import candidates, such as the Maven
/// classpath of the enclosing module.
///
/// `find` is synchronous and must be callable from any thread. An
/// implementation may populate its index lazily on the first call, in which
/// case that call blocks until the index is ready; subsequent calls are
/// idempotent lookups.
pub trait Environment: Send + Sync {
    /// For each identifier, every import the environment can provide for it.
    /// Identifiers the environment knows nothing about are absent from the
    /// returned map.
    fn find(&self, identifiers: &[Identifier]) -> HashMap<Identifier, Vec<Import>>;
}
