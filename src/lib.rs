#![doc = "The `tasktracker` library crate."]
#![doc = ""]
#![doc = "Users register and log in to receive a bearer token, then create, list, update and"]
#![doc = "delete tasks. The crate holds the credential handling, the access guard, the"]
#![doc = "services, the store backends and the HTTP routes; `main.rs` wires them into a server."]
#![doc = ""]
#![doc = "Authorization is authentication only: any logged-in user may read, modify or delete"]
#![doc = "any user or task. Deleting a user deletes that user's tasks."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::state::AppState;
