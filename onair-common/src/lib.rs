//! # OnAir Common Library
//!
//! Shared code for the OnAir portal microservices including:
//! - Domain models (banners, schedule entries, columnists)
//! - Event types (OnairEvent enum) and the EventBus
//! - Configuration loading
//! - Error types
//! - Timestamp utilities

pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod time;

pub use error::{Error, Result};
