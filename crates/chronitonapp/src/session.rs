//! Selection tracking on top of a [`ReminderModel`].
//!
//! A UI usually has one Event "open". [`Session`] keeps that selection valid across
//! deletes: when the selected Event disappears (directly or with its Category), the
//! first Event in display order is selected instead, or nothing if there are none.

use crate::api::ReminderModel;
use crate::commands::CmdResult;
use crate::config::ChronitonConfig;
use crate::error::Result;
use crate::model::{CategoryId, Event, EventId};
use crate::store::DataStore;

pub struct Session<S: DataStore> {
    model: ReminderModel<S>,
    selected: Option<EventId>,
}

impl<S: DataStore> Session<S> {
    pub fn new(model: ReminderModel<S>) -> Self {
        Self {
            model,
            selected: None,
        }
    }

    pub fn model(&self) -> &ReminderModel<S> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ReminderModel<S> {
        &mut self.model
    }

    pub fn select_event(&mut self, id: Option<EventId>) {
        self.selected = id;
    }

    /// The selected Event, if it still exists.
    pub fn selected_event(&self) -> Option<Event> {
        self.selected.and_then(|id| self.model.get_event(id).ok())
    }

    pub fn select_first_event(&mut self) -> Result<Option<EventId>> {
        self.selected = self.model.first_event()?.map(|e| e.id);
        Ok(self.selected)
    }

    pub fn delete_event(&mut self, id: EventId) -> Result<CmdResult> {
        let result = self.model.delete_event(id)?;
        if self.selected == Some(id) {
            self.select_first_event()?;
        }
        Ok(result)
    }

    pub fn delete_category(&mut self, id: CategoryId) -> Result<CmdResult> {
        let selection_inside = self
            .selected_event()
            .is_some_and(|event| event.category_id == id);
        let result = self.model.delete_category(id)?;
        if selection_inside {
            self.select_first_event()?;
        }
        Ok(result)
    }

    /// Due count for a badge, or `None` when badges are turned off.
    pub fn badge_count(&self, config: &ChronitonConfig) -> Result<Option<usize>> {
        if !config.badge_enabled {
            return Ok(None);
        }
        self.model.count_due_events(config.badge_days).map(Some)
    }
}
