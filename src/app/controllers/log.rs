use crate::app::session::{LogViewState, Session};
use crate::events::{EventBus, EventKind, SubscriptionId};

/// Live server log view. Subscribes to `log` only while the view is open;
/// the lines themselves are kept by the session for the whole app lifetime.
#[derive(Debug, Default)]
pub struct LogController {
    subscription: Option<SubscriptionId>,
}

impl LogController {
    pub fn activate(&mut self, bus: &mut EventBus<Session>, session: &mut Session) {
        if self.subscription.is_some() {
            return;
        }
        session.log_view = LogViewState::default();
        let id = bus.subscribe(EventKind::Log, |s, _| {
            s.log_view.received += 1;
            // Keep a scrolled-back viewport on the same lines
            if s.log_view.scroll_back > 0 {
                s.log_view.scroll_back += 1;
            }
            Ok(())
        });
        self.subscription = Some(id);
    }

    /// Returns false if the view was not active.
    pub fn deactivate(&mut self, bus: &mut EventBus<Session>) -> bool {
        match self.subscription.take() {
            Some(id) => bus.unsubscribe(id),
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn scroll(&self, session: &mut Session, delta: isize) {
        let max = session.logs.len().saturating_sub(1);
        let current = session.log_view.scroll_back as isize;
        session.log_view.scroll_back = (current + delta).clamp(0, max as isize) as usize;
    }
}
