#![forbid(unsafe_code)]

//! Wire model for the CityBrain backend REST surface.
//!
//! Everything here mirrors what the backend actually emits: response bodies
//! for the dashboard, operations, zoning, opportunity and company endpoints,
//! the push-notification payload, and the `{"detail": ...}` error envelope.

pub mod dto;
pub mod errors;

pub use dto::*;
pub use errors::{ApiFailure, ErrorEnvelope, Severity};

pub const CRATE_NAME: &str = "citybrain-api";
