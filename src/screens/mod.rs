//!
//! # Screens
//!
//! One module per screen, each a flat "load data, render, act on an event,
//! reload" sequence, the shape the original pages had. Screens talk to the
//! terminal (or a test double) only through the `Ui` trait, and express
//! navigation as a value instead of mutating a location bar.

pub mod auth;
pub mod board_edit;
pub mod dashboard;
pub mod profile;

use crate::error::AppError;

/// Where the shell should go next. Returned by every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Login,
    Dashboard,
    BoardEdit(i64),
    Profile,
    Quit,
}

/// The seam between flows and the terminal. Everything a screen can do to the
/// user goes through here, which keeps the flows testable without a terminal.
pub trait Ui {
    /// Asks for one line of input. `None` means the input stream ended.
    fn prompt(&mut self, label: &str) -> Option<String>;
    /// Asks a yes/no question; a declined confirmation must abort the action.
    fn confirm(&mut self, question: &str) -> bool;
    /// Shows an error next to the field it belongs to.
    fn field_error(&mut self, field: &str, message: &str);
    /// Shows a blocking error that has no obvious field.
    fn alert(&mut self, message: &str);
    /// Displays a block of rendered content.
    fn show(&mut self, content: &str);
}

/// Maps an error from a flow step to what the user sees and where the shell
/// goes. Auth errors always land on the login screen (the session was already
/// cleared by the API client); everything else stays put after an alert.
pub(crate) fn handle_error(ui: &mut dyn Ui, err: &AppError, stay: Nav) -> Nav {
    match err {
        AppError::Auth(_) => Nav::Login,
        AppError::Network(_) => {
            log::error!("request failed: {}", err);
            ui.alert("Server error. Try again later.");
            stay
        }
        _ => {
            ui.alert(&err.to_string());
            stay
        }
    }
}
