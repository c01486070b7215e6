//! # Domain Model: Categories and Events
//!
//! This module defines the two record types of chroniton: [`Category`] and [`Event`].
//!
//! ## Shape of the Data
//!
//! ```text
//! Category "Car"         order_index 0
//! ├── Event "Oil"        order_index 0   category_id = Car
//! └── Event "Tires"      order_index 1   category_id = Car
//! Category "House"       order_index 1
//! └── Event "Filters"    order_index 0   category_id = House
//! ```
//!
//! - Categories are ordered globally by `order_index`.
//! - Events are ordered by `order_index` *within* their owning Category.
//! - An Event points at its owner through `category_id`. Categories hold no list of
//!   Events; the set is derived by filtering on that id.
//!
//! ## Ordering Is Not Editable Here
//!
//! Fields are public for reading and for serialization, but `order_index` and
//! `category_id` must only be changed through [`crate::api::ReminderModel`]. Writing
//! them directly breaks the dense 0..N-1 ordering the rest of the crate relies on.
//!
//! ## Placeholders
//!
//! Blank names and titles are never persisted. [`Category::normalize`] and
//! [`Event::normalize`] substitute [`DEFAULT_CATEGORY_NAME`] and [`DEFAULT_EVENT_TITLE`];
//! the store calls them on every save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ordering::Ordered;

pub const DEFAULT_CATEGORY_NAME: &str = "New Category";
pub const DEFAULT_EVENT_TITLE: &str = "New Event";

pub type CategoryId = Uuid;
pub type EventId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub order_index: usize,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            order_index: 0,
            created_at: Utc::now(),
        }
    }

    /// Replace a blank name with the placeholder.
    pub fn normalize(&mut self) {
        if self.name.trim().is_empty() {
            self.name = DEFAULT_CATEGORY_NAME.to_string();
        }
    }
}

impl Ordered for Category {
    type Key = CategoryId;

    fn key(&self) -> CategoryId {
        self.id
    }

    fn position(&self) -> usize {
        self.order_index
    }

    fn set_position(&mut self, position: usize) {
        self.order_index = position;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// When the chore was last performed.
    #[serde(default)]
    pub last_date: Option<DateTime<Utc>>,
    /// When the chore is next due.
    #[serde(default)]
    pub next_date: Option<DateTime<Utc>>,
    /// Encoded image bytes, stored opaquely.
    #[serde(default)]
    pub image_data: Option<Vec<u8>>,
    pub order_index: usize,
    pub category_id: CategoryId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(title: impl Into<String>, category_id: CategoryId) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            notes: None,
            last_date: None,
            next_date: None,
            image_data: None,
            order_index: 0,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace a blank title with the placeholder.
    pub fn normalize(&mut self) {
        if self.title.trim().is_empty() {
            self.title = DEFAULT_EVENT_TITLE.to_string();
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_data.as_ref().is_some_and(|bytes| !bytes.is_empty())
    }
}

impl Ordered for Event {
    type Key = EventId;

    fn key(&self) -> EventId {
        self.id
    }

    fn position(&self) -> usize {
        self.order_index
    }

    fn set_position(&mut self, position: usize) {
        self.order_index = position;
    }
}

/// Field values for a new Event, beyond its title.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub notes: Option<String>,
    pub last_date: Option<DateTime<Utc>>,
    pub next_date: Option<DateTime<Utc>>,
}

impl EventDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_last_date(mut self, date: DateTime<Utc>) -> Self {
        self.last_date = Some(date);
        self
    }

    pub fn with_next_date(mut self, date: DateTime<Utc>) -> Self {
        self.next_date = Some(date);
        self
    }
}

/// A partial edit of an existing Event.
///
/// Outer `None` leaves the field alone; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub notes: Option<Option<String>>,
    pub last_date: Option<Option<DateTime<Utc>>>,
    pub next_date: Option<Option<DateTime<Utc>>>,
    pub image_data: Option<Option<Vec<u8>>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.notes.is_none()
            && self.last_date.is_none()
            && self.next_date.is_none()
            && self.image_data.is_none()
    }

    /// Apply to `event`. Returns true if any field changed.
    pub fn apply(self, event: &mut Event) -> bool {
        let before = event.clone();
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(notes) = self.notes {
            event.notes = notes;
        }
        if let Some(last) = self.last_date {
            event.last_date = last;
        }
        if let Some(next) = self.next_date {
            event.next_date = next;
        }
        if let Some(image) = self.image_data {
            event.image_data = image;
        }
        let changed = *event != before;
        if changed {
            event.updated_at = Utc::now();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_normalize_blank_name() {
        let mut category = Category::new("   ");
        category.normalize();
        assert_eq!(category.name, DEFAULT_CATEGORY_NAME);
    }

    #[test]
    fn test_category_normalize_keeps_name() {
        let mut category = Category::new("Car");
        category.normalize();
        assert_eq!(category.name, "Car");
    }

    #[test]
    fn test_event_normalize_blank_title() {
        let mut event = Event::new("", Uuid::new_v4());
        event.normalize();
        assert_eq!(event.title, DEFAULT_EVENT_TITLE);
    }

    #[test]
    fn test_legacy_event_without_optional_fields() {
        let id = Uuid::new_v4();
        let category_id = Uuid::new_v4();
        let json = format!(
            r#"{{
            "id": "{}",
            "title": "Oil",
            "order_index": 2,
            "category_id": "{}",
            "created_at": "2023-01-01T00:00:00Z",
            "updated_at": "2023-01-01T00:00:00Z"
        }}"#,
            id, category_id
        );

        let loaded: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.category_id, category_id);
        assert!(loaded.notes.is_none());
        assert!(loaded.next_date.is_none());
        assert!(!loaded.has_image());
    }

    #[test]
    fn test_patch_clears_and_sets() {
        let mut event = Event::new("Oil", Uuid::new_v4());
        event.notes = Some("5W-30".into());
        let old_updated_at = event.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(5));

        let changed = EventPatch {
            title: Some("Oil change".into()),
            notes: Some(None),
            ..Default::default()
        }
        .apply(&mut event);

        assert!(changed);
        assert_eq!(event.title, "Oil change");
        assert!(event.notes.is_none());
        assert!(event.updated_at > old_updated_at);
    }

    #[test]
    fn test_patch_noop_keeps_timestamp() {
        let mut event = Event::new("Oil", Uuid::new_v4());
        let old_updated_at = event.updated_at;

        let changed = EventPatch {
            title: Some("Oil".into()),
            ..Default::default()
        }
        .apply(&mut event);

        assert!(!changed);
        assert_eq!(event.updated_at, old_updated_at);
    }

    #[test]
    fn test_empty_patch() {
        assert!(EventPatch::default().is_empty());
        assert!(!EventPatch {
            image_data: Some(None),
            ..Default::default()
        }
        .is_empty());
    }
}
