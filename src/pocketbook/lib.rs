//! # Pocketbook Architecture
//!
//! Pocketbook keeps a personal address book and a tagged notebook and lets
//! you work with both from one interactive terminal session. The crate is a
//! library with a small binary on top: everything below the console is plain
//! Rust that can be driven, and tested, without a terminal.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Arguments, data directory, logging, ConsoleInterface     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session (session.rs)                                       │
//! │  - Menus and field-by-field wizards over a UserInterface    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Owns the collections, parses ids, load/save              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - One function per action, returns CmdResult               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain (model/, address_book.rs, notebook.rs, tags.rs)     │
//! │  Storage (store/): DataStore, FileStore, InMemoryStore      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O below the session
//!
//! The session talks to the outside world only through the
//! [`ui::UserInterface`] trait. Commands and the API take already-collected
//! values and return [`commands::CmdResult`]s; they never read or print.
//! Invalid values are refused when a field is constructed
//! ([`model::Phone::new`] and friends), so a stored record is always valid.
//!
//! ## Testing
//!
//! - Domain and commands: unit tests on plain collections
//! - API and session: `InMemoryStore` plus [`test_utils::ScriptedInterface`]
//! - Files and the binary: `tests/` with temp directories

pub mod address_book;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod notebook;
pub mod session;
pub mod store;
pub mod tags;
pub mod ui;
pub mod validators;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
