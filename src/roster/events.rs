//! Synchronous change notifications.
//!
//! Subscribers are called on the caller's stack, one after another, before
//! the command that triggered them returns. A failing subscriber is logged
//! and skipped; it never stops delivery to the others.

use std::fmt;

use super::snapshot::Snapshot;

/// Named change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    StateInit,
    RosterChanged,
    DetachmentChanged,
    DoctrineChanged,
    ForgeWorldChanged,
    PointsChanged,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::StateInit,
        EventKind::RosterChanged,
        EventKind::DetachmentChanged,
        EventKind::DoctrineChanged,
        EventKind::ForgeWorldChanged,
        EventKind::PointsChanged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::StateInit => "stateInit",
            EventKind::RosterChanged => "rosterChanged",
            EventKind::DetachmentChanged => "detachmentChanged",
            EventKind::DoctrineChanged => "doctrineChanged",
            EventKind::ForgeWorldChanged => "forgeWorldChanged",
            EventKind::PointsChanged => "pointsChanged",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which events a subscriber receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    Only(EventKind),
    /// Wildcard: every event, after the specific subscribers.
    All,
}

impl EventFilter {
    fn is_specific_for(&self, kind: EventKind) -> bool {
        matches!(self, EventFilter::Only(k) if *k == kind)
    }
}

impl From<EventKind> for EventFilter {
    fn from(kind: EventKind) -> Self {
        EventFilter::Only(kind)
    }
}

/// A notification with the state it describes.
#[derive(Debug, Clone)]
pub struct RosterEvent {
    pub kind: EventKind,
    pub snapshot: Snapshot,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type EventHandler = Box<dyn FnMut(&RosterEvent) -> anyhow::Result<()> + Send>;

struct Subscriber {
    id: SubscriptionId,
    filter: EventFilter,
    handler: EventHandler,
}

/// Observer registry keyed by event kind.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, filter: EventFilter, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            filter,
            handler,
        });
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Deliver `event` to specific subscribers, then wildcard subscribers,
    /// each group in subscription order. Returns how many handlers succeeded.
    pub fn emit(&mut self, event: &RosterEvent) -> usize {
        let kind = event.kind;
        let (specific, wildcard): (Vec<_>, Vec<_>) = self
            .subscribers
            .iter_mut()
            .filter(|s| s.filter == EventFilter::All || s.filter.is_specific_for(kind))
            .partition(|s| s.filter != EventFilter::All);

        let mut delivered = 0;
        for subscriber in specific.into_iter().chain(wildcard) {
            match (subscriber.handler)(event) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        event = %kind,
                        subscription = subscriber.id.0,
                        error = %e,
                        "Event handler failed"
                    );
                }
            }
        }
        delivered
    }
}
