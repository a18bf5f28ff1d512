//! In-process publish/subscribe for [`ServerEvent`]s.
//!
//! The bus is generic over the state container `C` that handlers mutate. The
//! shell owns both the bus and the container and hands the container in on
//! every publish, so there is no shared global scope.

use super::{EventKind, ServerEvent};
use std::any::Any;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use tracing::{error, warn};

thread_local! {
    static IN_HANDLER: Cell<bool> = const { Cell::new(false) };
}

/// Whether a bus handler is running on this thread. A process panic hook
/// checks this to leave panics that [`EventBus::publish`] catches alone.
pub fn in_handler() -> bool {
    IN_HANDLER.with(Cell::get)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

pub type Handler<C> = Box<dyn FnMut(&mut C, &ServerEvent) -> anyhow::Result<()> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber<C> {
    id: SubscriptionId,
    kind: EventKind,
    handler: Handler<C>,
}

pub struct EventBus<C> {
    next_id: u64,
    subscribers: Vec<Subscriber<C>>,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for one event kind. Keep the returned id to
    /// unsubscribe when the owning view goes away.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: FnMut(&mut C, &ServerEvent) -> anyhow::Result<()> + Send + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push(Subscriber {
            id,
            kind,
            handler: Box::new(handler),
        });
        id
    }

    /// Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.iter().filter(|s| s.kind == kind).count()
    }

    /// Deliver `event` to every subscriber of its kind, in registration
    /// order. A failing or panicking handler is logged and skipped; the rest
    /// still run. Returns how many handlers completed successfully.
    pub fn publish(&mut self, ctx: &mut C, event: &ServerEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;

        for sub in self.subscribers.iter_mut().filter(|s| s.kind == kind) {
            IN_HANDLER.with(|f| f.set(true));
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| (sub.handler)(ctx, event)));
            IN_HANDLER.with(|f| f.set(false));
            match outcome {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => warn!(event = %kind, subscription = sub.id.0, "handler failed: {e:#}"),
                Err(payload) => error!(
                    event = %kind,
                    subscription = sub.id.0,
                    "handler panicked: {}",
                    panic_message(payload.as_ref())
                ),
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TrackLink;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
    }

    fn play(name: &str) -> ServerEvent {
        ServerEvent::PlayTrack(TrackLink {
            name: Some(name.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_delivers_to_all_subscribers_in_order() {
        let mut bus = EventBus::<Recorder>::new();
        bus.subscribe(EventKind::PlayTrack, |r, ev| {
            if let ServerEvent::PlayTrack(link) = ev {
                r.seen.push(format!("a:{}", link.label()));
            }
            Ok(())
        });
        bus.subscribe(EventKind::PlayTrack, |r, ev| {
            if let ServerEvent::PlayTrack(link) = ev {
                r.seen.push(format!("b:{}", link.label()));
            }
            Ok(())
        });

        let mut rec = Recorder::default();
        assert_eq!(bus.publish(&mut rec, &play("one")), 2);
        assert_eq!(bus.publish(&mut rec, &play("two")), 2);
        assert_eq!(rec.seen, vec!["a:one", "b:one", "a:two", "b:two"]);
    }

    #[test]
    fn test_unsubscribed_kind_is_ignored() {
        let mut bus = EventBus::<Recorder>::new();
        bus.subscribe(EventKind::Log, |r, _| {
            r.seen.push("log".into());
            Ok(())
        });
        let mut rec = Recorder::default();
        assert_eq!(bus.publish(&mut rec, &ServerEvent::TrackEnd), 0);
        assert!(rec.seen.is_empty());
    }

    #[test]
    fn test_failing_handler_does_not_block_others() {
        let mut bus = EventBus::<Recorder>::new();
        bus.subscribe(EventKind::TrackEnd, |_, _| anyhow::bail!("boom"));
        bus.subscribe(EventKind::TrackEnd, |_, _| panic!("worse"));
        bus.subscribe(EventKind::TrackEnd, |r, _| {
            r.seen.push("survivor".into());
            Ok(())
        });

        let mut rec = Recorder::default();
        assert_eq!(bus.publish(&mut rec, &ServerEvent::TrackEnd), 1);
        assert_eq!(rec.seen, vec!["survivor"]);
    }

    #[test]
    fn test_in_handler_flag_is_scoped_to_handlers() {
        let mut bus = EventBus::<Recorder>::new();
        bus.subscribe(EventKind::TrackEnd, |r, _| {
            r.seen.push(format!("inside:{}", in_handler()));
            Ok(())
        });
        bus.subscribe(EventKind::TrackEnd, |_, _| panic!("boom"));

        let mut rec = Recorder::default();
        assert!(!in_handler());
        bus.publish(&mut rec, &ServerEvent::TrackEnd);
        assert_eq!(rec.seen, vec!["inside:true"]);
        // Cleared again, even after a panicking handler
        assert!(!in_handler());
    }

    #[test]
    fn test_panic_message_extraction() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let fixed: Box<dyn Any + Send> = Box::new("fixed");
        let other: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(owned.as_ref()), "owned");
        assert_eq!(panic_message(fixed.as_ref()), "fixed");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::<Recorder>::new();
        let id = bus.subscribe(EventKind::TrackEnd, |r, _| {
            r.seen.push("x".into());
            Ok(())
        });
        assert_eq!(bus.subscriber_count(EventKind::TrackEnd), 1);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));

        let mut rec = Recorder::default();
        bus.publish(&mut rec, &ServerEvent::TrackEnd);
        assert!(rec.seen.is_empty());
    }
}
