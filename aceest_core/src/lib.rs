#![forbid(unsafe_code)]

//! Core domain model and business logic for the ACEest Fitness workout log.
//!
//! This crate provides:
//! - Domain types (categories, entries, raw submissions, aggregates)
//! - The in-memory categorized workout store
//! - Summary and progress statistics
//! - Static reference content (exercise and diet suggestions)
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{get_reference_catalog, ReferenceCatalog};
pub use config::Config;
pub use stats::{compute_progress, motivation_for, summarize};
pub use store::WorkoutStore;
