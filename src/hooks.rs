//! Per-connection hook registry.
//!
//! Hooks are keyed by event kind and a caller-supplied id. At most one
//! callback exists per (event, id) pair; re-registering the same pair
//! overwrites silently. Invocation order across ids is unspecified and
//! must not be relied upon.

use std::collections::HashMap;

use crate::conn::Context;
use crate::error::{ClientError, Result};
use crate::event::{Event, EventKind};

/// A registered callback. Runs synchronously on the dispatching
/// connection's tick; a blocking hook stalls the whole scheduler.
pub type Hook = Box<dyn FnMut(&mut Context<'_>, &Event)>;

/// Registry of user hooks for one connection.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<EventKind, HashMap<String, Hook>>,
}

impl HookRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register `hook` under `id` for `kind`, overwriting any existing
    /// callback at that pair.
    pub(crate) fn insert(&mut self, kind: EventKind, id: impl Into<String>, hook: Hook) {
        self.hooks.entry(kind).or_default().insert(id.into(), hook);
    }

    /// Remove the callback at (kind, id).
    pub(crate) fn remove(&mut self, kind: EventKind, id: &str) -> Result<()> {
        let removed = self
            .hooks
            .get_mut(&kind)
            .and_then(|set| set.remove(id))
            .is_some();
        if removed {
            Ok(())
        } else {
            Err(ClientError::HookNotFound {
                event: kind,
                id: id.to_string(),
            })
        }
    }

    /// Call every callback registered for the event's kind, in
    /// unspecified order. A no-op when none are registered.
    pub(crate) fn invoke(&mut self, ctx: &mut Context<'_>, event: &Event) {
        if let Some(set) = self.hooks.get_mut(&event.kind()) {
            for hook in set.values_mut() {
                hook(ctx, event);
            }
        }
    }

    #[cfg(test)]
    fn count(&self, kind: EventKind) -> usize {
        self.hooks.get(&kind).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut reg = HookRegistry::new();
        reg.insert(EventKind::Chat, "a", Box::new(|_, _| {}));
        reg.insert(EventKind::Chat, "b", Box::new(|_, _| {}));
        assert_eq!(reg.count(EventKind::Chat), 2);

        reg.remove(EventKind::Chat, "a").unwrap();
        assert_eq!(reg.count(EventKind::Chat), 1);
    }

    #[test]
    fn test_duplicate_id_overwrites() {
        let mut reg = HookRegistry::new();
        reg.insert(EventKind::Join, "same", Box::new(|_, _| {}));
        reg.insert(EventKind::Join, "same", Box::new(|_, _| {}));
        assert_eq!(reg.count(EventKind::Join), 1);
    }

    #[test]
    fn test_remove_unregistered_fails() {
        let mut reg = HookRegistry::new();
        let err = reg.remove(EventKind::Part, "ghost").unwrap_err();
        assert!(matches!(
            err,
            ClientError::HookNotFound {
                event: EventKind::Part,
                ..
            }
        ));

        // Same id under a different event does not shadow.
        reg.insert(EventKind::Chat, "ghost", Box::new(|_, _| {}));
        assert!(reg.remove(EventKind::Part, "ghost").is_err());
        assert!(reg.remove(EventKind::Chat, "ghost").is_ok());
    }
}
