//! # Command Layer
//!
//! This module contains the **core business logic** of chroniton. Each group of
//! operations lives in its own submodule as plain functions over a
//! [`DataStore`](crate::store::DataStore).
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Keep Category order and per-Category Event order dense through every mutation,
//!   using the rules in [`crate::ordering`]
//! - Stage every touched record, then `commit` exactly once
//! - Return a structured [`CmdResult`] with affected records, change notices and messages
//!
//! ## All or Nothing
//!
//! Every precondition (record exists, owner exists, index in range) is checked on
//! in-memory copies *before* the first record is staged. If anything fails after
//! staging began, the caller ([`crate::api::ReminderModel`]) rolls the store back.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: No stdout, stderr, or terminal concerns
//! - **Notifications**: They list the [`ModelChange`]s; the API publishes them after the
//!   commit succeeded
//! - **Selection**: Tracking the selected Event is the [`crate::session::Session`]'s job
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests use
//! `InMemoryStore` and check both the returned records and the dense ordering of
//! everything left in the store.
//!
//! ## Command Modules
//!
//! - [`categories`]: Create, delete, move, rename Categories
//! - [`events`]: Create, delete, move (within and across Categories), edit Events
//! - [`list`]: Ordered queries, first event, event paths
//! - [`due`]: Due counts and due listings
//! - [`doctor`]: Verify and repair ordering consistency
//! - [`helpers`]: Shared utilities (owner lookup, staging, order logging)

use crate::model::{Category, Event};
use crate::notify::ModelChange;
use serde::Serialize;

pub mod categories;
pub mod doctor;
pub mod due;
pub mod events;
pub mod helpers;
pub mod list;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Categories created or modified, as persisted.
    pub affected_categories: Vec<Category>,
    /// Events created or modified, as persisted.
    pub affected_events: Vec<Event>,
    /// Notices to publish once the commit is known to have succeeded.
    pub changes: Vec<ModelChange>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn add_change(&mut self, change: ModelChange) {
        self.changes.push(change);
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.affected_categories.push(category);
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.affected_events.push(event);
        self
    }

    /// The first affected Category, if any.
    pub fn category(&self) -> Option<&Category> {
        self.affected_categories.first()
    }

    /// The first affected Event, if any.
    pub fn event(&self) -> Option<&Event> {
        self.affected_events.first()
    }
}
