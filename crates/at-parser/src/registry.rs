//! Handler registration and lookup.
//!
//! Handlers are kept in registration order and matched per dispatched line
//! with a linear scan. A registration is identified by its (name, handler)
//! pair, where handler identity is the `Arc` allocation: registering the
//! same pair twice is a no-op, and removal requires the same `Arc` that was
//! registered.

use std::fmt;
use std::sync::Arc;

use crate::command::ParsedCommand;
use crate::error::{ParserError, ParserResult};

/// A callback invoked for every dispatched command whose name matches the
/// registration.
///
/// State a handler needs (a config store, a response channel, ...) is
/// captured by the implementing type or closure rather than threaded
/// through the parser as an opaque context.
pub trait CommandHandler {
    /// Handle one parsed command. The borrowed data is valid only for the
    /// duration of this call.
    fn on_command(&self, command: &ParsedCommand<'_>);
}

impl<F> CommandHandler for F
where
    F: Fn(&ParsedCommand<'_>),
{
    fn on_command(&self, command: &ParsedCommand<'_>) {
        self(command)
    }
}

/// One (name, handler) registration.
pub(crate) struct HandlerEntry {
    pub name: String,
    pub handler: Arc<dyn CommandHandler>,
}

/// Insertion-ordered set of handler registrations.
#[derive(Default)]
pub(crate) struct HandlerRegistry {
    entries: Vec<HandlerEntry>,
}

impl HandlerRegistry {
    /// Register a handler under `name`. Re-registering an identical
    /// (name, handler) pair is a no-op.
    pub fn add(&mut self, name: &str, handler: Arc<dyn CommandHandler>) -> ParserResult<()> {
        if name.is_empty() {
            return Err(ParserError::EmptyCommandName);
        }
        let registered = self
            .entries
            .iter()
            .any(|entry| entry.name == name && Arc::ptr_eq(&entry.handler, &handler));
        if !registered {
            self.entries.push(HandlerEntry {
                name: name.to_string(),
                handler,
            });
        }
        Ok(())
    }

    /// Remove the registration matching the exact (name, handler) pair.
    /// Removing a pair that was never registered is a no-op, not an error.
    pub fn remove(&mut self, name: &str, handler: &Arc<dyn CommandHandler>) -> ParserResult<()> {
        if name.is_empty() {
            return Err(ParserError::EmptyCommandName);
        }
        self.entries
            .retain(|entry| !(entry.name == name && Arc::ptr_eq(&entry.handler, handler)));
        Ok(())
    }

    /// Entries matching a classified command name, in registration order.
    ///
    /// Matching is length-bounded over the classified name: an entry
    /// matches when its registered name starts with the name bytes taken
    /// from the line.
    pub fn matches<'a>(&'a self, name: &'a [u8]) -> impl Iterator<Item = &'a HandlerEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.name.as_bytes().starts_with(name))
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| &entry.name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Arc<dyn CommandHandler> {
        Arc::new(|_: &ParsedCommand<'_>| {})
    }

    #[test]
    fn test_add_is_idempotent_for_same_pair() {
        let mut registry = HandlerRegistry::default();
        let handler = noop();

        registry.add("HELLOW", handler.clone()).unwrap();
        registry.add("HELLOW", handler.clone()).unwrap();
        assert_eq!(registry.len(), 1);

        // Same name with a different handler is a distinct registration.
        registry.add("HELLOW", noop()).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut registry = HandlerRegistry::default();
        assert_eq!(
            registry.add("", noop()),
            Err(ParserError::EmptyCommandName)
        );
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_remove_exact_pair() {
        let mut registry = HandlerRegistry::default();
        let first = noop();
        let second = noop();
        registry.add("HELLOW", first.clone()).unwrap();
        registry.add("HELLOW", second.clone()).unwrap();

        registry.remove("HELLOW", &first).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry
            .matches(b"HELLOW")
            .all(|entry| Arc::ptr_eq(&entry.handler, &second)));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut registry = HandlerRegistry::default();
        registry.add("HELLOW", noop()).unwrap();

        registry.remove("HELLOW", &noop()).unwrap();
        registry.remove("OTHER", &noop()).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_matches_is_length_bounded() {
        let mut registry = HandlerRegistry::default();
        registry.add("HELLOW", noop()).unwrap();
        registry.add("HELLOWORLD", noop()).unwrap();
        registry.add("HEL", noop()).unwrap();

        // Both HELLOW and HELLOWORLD match the classified name HELLOW;
        // HEL is shorter than the classified name and does not.
        let names: Vec<&str> = registry
            .matches(b"HELLOW")
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["HELLOW", "HELLOWORLD"]);
    }
}
