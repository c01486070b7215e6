//! # Chroniton Architecture
//!
//! Chroniton tracks recurring chores ("Events") grouped into "Categories", and tells
//! you which ones are due. It is a **UI-agnostic library**; the `chroniton` binary is
//! just one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs)                                       │
//! │  - Owns the model and the selected Event                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - ReminderModel: thin facade over commands                 │
//! │  - Rolls back on failure, publishes changes on success      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic: dense ordering, cascades, due counts     │
//! │  - Uses ordering.rs for every renumbering                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait: ordered queries, staging, commit        │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Invariants
//!
//! - Category `order_index` values are exactly `0..N-1`.
//! - Within each Category, Event `order_index` values are exactly `0..M-1`.
//! - Every Event belongs to exactly one existing Category.
//!
//! Every public mutation keeps these true after it returns, whether it succeeded or not.
//!
//! ## No I/O Assumptions in Core
//!
//! Nothing in this crate writes to stdout or stderr or exits the process. Diagnostics
//! go through `tracing`; installing a subscriber is the client's call.
//!
//! ## Module Overview
//!
//! - [`api`]: `ReminderModel`, the entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`ordering`]: Dense sibling renumbering
//! - [`due`]: The due-date rule
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Category`, `Event`, drafts and patches
//! - [`notify`]: Change notifications
//! - [`session`]: Selection tracking
//! - [`index`]: Display positions and selectors (`2`, `2.3`)
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and startup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod due;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod notify;
pub mod ordering;
pub mod session;
pub mod store;
