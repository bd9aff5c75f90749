//! # Plaza Architecture
//!
//! Plaza is a **UI-agnostic browsing library** for community directory
//! datasets (chamber members, city attractions, club rides) with a CLI
//! client on top. The library never touches stdout; the binary is the
//! only place that knows about terminals and exit codes.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, prints rendered text and messages      │
//! │  - Runs the interactive browse session                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Facade (api.rs)                                        │
//! │  - Per-dataset loading with fallback policy                 │
//! │  - Registration / config / export dispatch                  │
//! │  - Returns data + structured CmdMessages                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engines (filter, render, view, modal, stats, registration) │
//! │  - Pure functions over snapshots and criteria               │
//! │  - No I/O; exhaustively unit tested                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/, prefs.rs)                                 │
//! │  - DataSource + DataStore with wholesale snapshot swaps     │
//! │  - Namespaced key-value preference store                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principles
//!
//! - **Snapshots are owned and passed, never ambient.** Filtering and
//!   rendering are functions of a snapshot plus ephemeral view state, so
//!   no handler can see a half-updated dataset.
//! - **Failures replace nothing.** A failed load leaves the prior
//!   snapshot in place; fallback policy lives in the facade, not the
//!   store.
//! - **Transitions are data.** The view state machine and the modal
//!   stack return effects and closed-dialog records instead of doing the
//!   work themselves, which keeps them testable without a terminal.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade — entry point for all operations
//! - [`model`]: dataset types and the [`model::Record`] seam
//! - [`store`]: data sources, snapshots, load semantics
//! - [`filter`]: criteria and the pure view derivation
//! - [`render`]: grid/list/detail text rendering
//! - [`view`]: the loading/loaded/error state machine
//! - [`modal`]: the LIFO dialog stack
//! - [`stats`]: ride roll-ups and availability
//! - [`registration`]: sign-up validation and the ledger record
//! - [`prefs`]: the namespaced preference store
//! - [`export`]: backup archives
//! - [`error`]: error types

pub mod api;
pub mod error;
pub mod export;
pub mod filter;
pub mod modal;
pub mod model;
pub mod prefs;
pub mod registration;
pub mod render;
pub mod stats;
pub mod store;
pub mod view;
