//! Core models, state store and HTTP client for guestbook.
//!
//! This crate provides shared types and backend access used by both
//! the TUI and CLI frontends.

pub mod api;
pub mod board;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod time;

pub use api::{BoardApi, HttpBoardApi};
pub use board::{Board, Effect, LoadState};
pub use client::{DeleteOutcome, GuestbookClient, Notifier};
pub use config::Config;
pub use dispatch::{execute, Request, Response};
pub use error::{ApiError, ValidationError};
pub use models::{BackendStatus, Entry, EntryId, FormState, HealthReport, NewEntry, Schema};
