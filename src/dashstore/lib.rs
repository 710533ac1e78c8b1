//! # Dashstore Architecture
//!
//! Dashstore is a **local-first document store** for desktop dashboards. Every
//! page of a dashboard (todos, calendar, pomodoro, bookmarks, time tracking)
//! keeps one JSON document per key; dashstore keeps those documents in a fast
//! in-process cache and, when configured, in one JSON file per key on disk.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, validates keys                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - get, set, remove, clear, list, check, export, import     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - TieredStore facade: cache-aside reads, write-through     │
//! │  - Tier trait: MemTier (fast), FsTier (durable)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Embedding applications usually talk to [`store::facade::TieredStore`]
//! directly:
//!
//! ```no_run
//! use dashstore::model::{keys, Priority, Todo};
//! use dashstore::store::facade::TieredStore;
//! use dashstore::store::fs_tier::FsTier;
//! use dashstore::store::mem_tier::MemTier;
//!
//! let store = TieredStore::with_durable(MemTier::fast(), FsTier::new("/tmp/dash"));
//! let mut todos = store.load_doc(&keys::TODOS, Vec::new());
//! todos.push(Todo::new("water plants", Priority::Low));
//! store.save_doc(&keys::TODOS, &todos);
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code returns Rust types and never prints. Failures
//! are either returned as [`error::StoreError`] (`try_*` methods) or logged
//! through the `log` facade (best-effort methods); the binary decides where
//! logs go.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for clients
//! - [`commands`]: One module per operation
//! - [`store`]: Tier trait, tier implementations and the tiered facade
//! - [`key`]: Validated storage keys and typed key handles
//! - [`model`]: Typed documents for the dashboard's well-known keys
//! - [`schema`]: Key → document shape registry
//! - [`config`]: Layered configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod key;
pub mod model;
pub mod schema;
pub mod store;
