#![forbid(unsafe_code)]

//! Data/state layer of the CityBrain dashboard: a typed client for the
//! backend REST surface, per-domain stores with load/loading/error
//! semantics, optimistic ticket creation modeled as an explicit pending
//! mutation, and a passive WebSocket notification listener.
//!
//! Stores are plain structs constructed with an [`ApiClient`] handle; there
//! are no process-wide singletons. Each store owns exclusive write access to
//! its slice.

pub mod client;
pub mod notifications;
pub mod stores;

pub use client::{ApiClient, AsSearchParams, IpgSearchParams, DEFAULT_BASE_URL};
pub use notifications::{ListenerError, NotificationListener, DEFAULT_NOTIFICATIONS_URL};

pub const CRATE_NAME: &str = "citybrain-client";
