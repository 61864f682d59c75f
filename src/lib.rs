#![doc = "The `taskdeck` library crate."]
#![doc = ""]
#![doc = "This crate contains the typed API client, session management, domain models,"]
#![doc = "pure view-model rendering and the screen flows of the taskdeck client."]
#![doc = "It is used by the main binary (`main.rs`) to drive the interactive terminal shell."]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod screens;
pub mod session;

pub use crate::api::ApiClient;
pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::session::{SessionStore, TokenPair};
