//! Attached observers and notification fan-out.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::events::{Notification, Observer, ObserverId};

/// Shared handle to an observer. The caller keeps a clone to read it back.
pub type SharedObserver = Rc<RefCell<dyn Observer>>;

/// Observers in attach order.
#[derive(Default)]
pub(crate) struct ObserverSet {
    entries: Vec<(ObserverId, SharedObserver)>,
    next_id: u32,
}

impl ObserverSet {
    pub(crate) fn attach(&mut self, observer: SharedObserver) -> ObserverId {
        let id = ObserverId::new(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Returns false if `id` was not attached.
    pub(crate) fn detach(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Deliver `notifications` to one observer.
    pub(crate) fn send_to(&self, id: ObserverId, notifications: &[Notification]) {
        if let Some((_, observer)) = self.entries.iter().find(|(entry, _)| *entry == id) {
            deliver(observer, notifications);
        }
    }

    /// Deliver `notifications` to every observer.
    pub(crate) fn broadcast(&self, notifications: &[Notification]) {
        if notifications.is_empty() {
            return;
        }
        debug!(count = notifications.len(), observers = self.entries.len(), "flushing notifications");
        for (_, observer) in &self.entries {
            deliver(observer, notifications);
        }
    }
}

fn deliver(observer: &SharedObserver, notifications: &[Notification]) {
    let mut observer = observer.borrow_mut();
    for notification in notifications {
        observer.notify(notification);
    }
}

impl std::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries.iter().map(|(id, _)| id)).finish()
    }
}
