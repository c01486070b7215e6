//! In-process change notifications.
//!
//! [`ChangeBus`] fans every [`ModelChange`] out to any number of subscribers over
//! `std::sync::mpsc` channels. The model publishes only after a successful commit, so a
//! receiver never hears about a change that was rolled back.
//!
//! ```
//! use chronitonapp::notify::{ChangeBus, ModelChange};
//!
//! let mut bus = ChangeBus::default();
//! let rx = bus.subscribe();
//! bus.publish(ModelChange::CategoriesReordered);
//! assert_eq!(rx.try_recv().unwrap(), ModelChange::CategoriesReordered);
//! ```

use serde::Serialize;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::model::{CategoryId, EventId};

/// Something that changed in the ordered model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelChange {
    CategoryCreated {
        category: CategoryId,
    },
    CategoryDeleted {
        category: CategoryId,
        events_removed: usize,
    },
    CategoryRenamed {
        category: CategoryId,
    },
    /// Category positions changed (create, delete and move all renumber).
    CategoriesReordered,
    EventCreated {
        event: EventId,
        category: CategoryId,
    },
    EventDeleted {
        event: EventId,
        category: CategoryId,
    },
    EventUpdated {
        event: EventId,
    },
    /// Event positions within `category` changed.
    EventsReordered {
        category: CategoryId,
    },
    EventMoved {
        event: EventId,
        from: CategoryId,
        to: CategoryId,
    },
    /// `doctor` rewrote data; listeners should reload everything.
    Repaired,
}

#[derive(Default)]
pub struct ChangeBus {
    subscribers: Vec<Sender<ModelChange>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new receiver. It sees changes published from now on.
    pub fn subscribe(&mut self) -> Receiver<ModelChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver `change` to every live subscriber, dropping the ones that hung up.
    pub fn publish(&mut self, change: ModelChange) {
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }

    pub fn publish_all(&mut self, changes: impl IntoIterator<Item = ModelChange>) {
        for change in changes {
            self.publish(change);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
