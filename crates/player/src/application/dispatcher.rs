//! Event dispatch.
//!
//! The hosting application registers one handler per `EventKind` at startup.
//! The registry is immutable once built; the dispatcher resolves the event's
//! `type` through it and runs the handler synchronously on the caller's task.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use coup_protocol::{EventKind, GameEvent};

use crate::error::ProtocolError;

/// A page-level update function invoked with an event's `data`.
pub trait EventHandler: Send + Sync {
    fn handle(&self, data: &Value) -> anyhow::Result<()>;
}

impl<F> EventHandler for F
where
    F: Fn(&Value) -> anyhow::Result<()> + Send + Sync,
{
    fn handle(&self, data: &Value) -> anyhow::Result<()> {
        self(data)
    }
}

/// Immutable mapping from event kind to handler.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<EventKind, Arc<dyn EventHandler>>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    pub fn get(&self, kind: EventKind) -> Option<&Arc<dyn EventHandler>> {
        self.handlers.get(&kind)
    }

    pub fn contains(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

/// Collects handlers before the registry is frozen.
#[derive(Default)]
pub struct HandlerRegistryBuilder {
    handlers: HashMap<EventKind, Arc<dyn EventHandler>>,
}

impl HandlerRegistryBuilder {
    /// Register `handler` for `kind`. A later registration for the same kind wins.
    pub fn register(mut self, kind: EventKind, handler: impl EventHandler + 'static) -> Self {
        if self.handlers.insert(kind, Arc::new(handler)).is_some() {
            tracing::warn!(event_type = %kind, "Handler registered twice, keeping the last one");
        }
        self
    }

    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            handlers: self.handlers,
        }
    }
}

/// What a dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The event was the no-change sentinel; no handler ran.
    Skipped,
    /// The handler for this kind ran to completion.
    Handled(EventKind),
}

/// Routes each `GameEvent` to the handler registered for its type.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    registry: HandlerRegistry,
}

impl EventDispatcher {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Run the handler for `event.type` with `event.data`.
    ///
    /// Unknown types, kinds with no handler and handler failures all come back
    /// as `ProtocolError`; none of them panic.
    pub fn dispatch(&self, event: &GameEvent) -> Result<DispatchOutcome, ProtocolError> {
        if event.is_no_change() {
            return Ok(DispatchOutcome::Skipped);
        }

        let kind = event.event_kind()?;
        let handler = self
            .registry
            .get(kind)
            .ok_or(ProtocolError::MissingHandler(kind))?;

        tracing::debug!(event_type = %kind, "Dispatching game event");
        handler
            .handle(&event.data)
            .map_err(|e| ProtocolError::HandlerFailed {
                kind,
                message: format!("{e:#}"),
            })?;

        Ok(DispatchOutcome::Handled(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_handler(count: &Arc<AtomicU32>) -> impl EventHandler + 'static {
        let count = Arc::clone(count);
        move |_data: &Value| -> anyhow::Result<()> {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_sentinel_runs_no_handler() {
        let count = Arc::new(AtomicU32::new(0));
        let dispatcher = EventDispatcher::new(
            HandlerRegistry::builder()
                .register(EventKind::Reload, counting_handler(&count))
                .build(),
        );

        let outcome = dispatcher.dispatch(&GameEvent::no_change());

        assert!(matches!(outcome, Ok(DispatchOutcome::Skipped)));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handler_receives_event_data() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let dispatcher = EventDispatcher::new(
            HandlerRegistry::builder()
                .register(
                    EventKind::UpdateBoard,
                    move |data: &Value| -> anyhow::Result<()> {
                        seen_clone
                            .lock()
                            .map_err(|_| anyhow::anyhow!("poisoned"))?
                            .push(data.clone());
                        Ok(())
                    },
                )
                .build(),
        );

        let event = GameEvent::new(EventKind::UpdateBoard, json!({ "coins": 3 }));
        let outcome = dispatcher.dispatch(&event).expect("dispatch");

        assert_eq!(outcome, DispatchOutcome::Handled(EventKind::UpdateBoard));
        assert_eq!(*seen.lock().expect("lock"), vec![json!({ "coins": 3 })]);
    }

    #[test]
    fn test_unknown_type_is_a_protocol_error() {
        let count = Arc::new(AtomicU32::new(0));
        let dispatcher = EventDispatcher::new(
            HandlerRegistry::builder()
                .register(EventKind::Reload, counting_handler(&count))
                .build(),
        );
        let event = GameEvent {
            kind: "window_alert".to_string(),
            data: json!({}),
        };

        let err = dispatcher.dispatch(&event).expect_err("unknown type");

        assert!(matches!(err, ProtocolError::UnknownEventType(_)));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_known_kind_without_handler_is_reported() {
        let dispatcher = EventDispatcher::new(HandlerRegistry::builder().build());
        let event = GameEvent::new(EventKind::UpdateBoard, json!({}));

        let err = dispatcher.dispatch(&event).expect_err("missing handler");

        assert!(matches!(
            err,
            ProtocolError::MissingHandler(EventKind::UpdateBoard)
        ));
    }

    #[test]
    fn test_handler_failure_is_contained() {
        let dispatcher = EventDispatcher::new(
            HandlerRegistry::builder()
                .register(EventKind::Reload, |_data: &Value| -> anyhow::Result<()> {
                    anyhow::bail!("page gone")
                })
                .build(),
        );
        let event = GameEvent::new(EventKind::Reload, json!({ "url": "game_board" }));

        let err = dispatcher.dispatch(&event).expect_err("handler failed");

        match err {
            ProtocolError::HandlerFailed { kind, message } => {
                assert_eq!(kind, EventKind::Reload);
                assert_eq!(message, "page gone");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));
        let registry = HandlerRegistry::builder()
            .register(EventKind::Reload, counting_handler(&first))
            .register(EventKind::Reload, counting_handler(&second))
            .build();
        assert_eq!(registry.len(), 1);

        let dispatcher = EventDispatcher::new(registry);
        assert!(dispatcher.registry().contains(EventKind::Reload));
        assert!(!dispatcher.registry().contains(EventKind::UpdateBoard));

        dispatcher
            .dispatch(&GameEvent::new(EventKind::Reload, json!({})))
            .expect("dispatch");

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
