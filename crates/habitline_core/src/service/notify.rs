//! Change notification for UI refresh.
//!
//! # Responsibility
//! - Let callers register callbacks that fire after successful mutations.
//!
//! # Invariants
//! - Exactly one event fires per successful mutation; failed operations
//!   emit nothing.
//! - Subscribers are invoked in registration order.

/// Which slice of the store changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Categories,
    Habits,
    Records,
}

type Subscriber = Box<dyn Fn(ChangeKind) + Send>;

/// Registered-callback observer for store changes.
///
/// A plain callback list: generalization of per-store delegate protocols,
/// not a message bus.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<Subscriber>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback invoked after every successful mutation.
    pub fn subscribe(&mut self, subscriber: impl Fn(ChangeKind) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Notifies all subscribers of one change.
    pub fn notify(&self, kind: ChangeKind) {
        for subscriber in &self.subscribers {
            subscriber(kind);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeKind, ChangeNotifier};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn notify_reaches_every_subscriber() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut notifier = ChangeNotifier::new();

        for _ in 0..3 {
            let counter = Arc::clone(&counter);
            notifier.subscribe(move |kind| {
                assert_eq!(kind, ChangeKind::Habits);
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        notifier.notify(ChangeKind::Habits);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(notifier.subscriber_count(), 3);
    }

    #[test]
    fn notifier_without_subscribers_is_a_no_op() {
        let notifier = ChangeNotifier::new();
        notifier.notify(ChangeKind::Records);
    }
}
