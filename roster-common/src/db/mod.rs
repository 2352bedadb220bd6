//! Database models and schema setup

pub mod init;
pub mod models;

pub use init::*;
pub use models::*;
