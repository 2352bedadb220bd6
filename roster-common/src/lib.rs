//! # Roster Common Library
//!
//! Shared code for the roster service including:
//! - Entity models (groups and persons)
//! - Database initialization and seeding
//! - Bootstrap configuration loading
//! - Common error types

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
