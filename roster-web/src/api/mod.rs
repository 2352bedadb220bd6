//! HTTP API handlers for roster-web

pub mod health;
pub mod person;

pub use health::health_routes;
pub use person::{list_persons, redirect_to_list, search_persons, show_create_form, submit_create};
