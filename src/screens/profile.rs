//!
//! # Profile Edit
//!
//! Fetches the current user through the "who am I" endpoint, prefills the
//! form from it, and updates the profile. The original page read the user id
//! out of the token payload client-side; the id now always comes from the
//! server.

use super::{Nav, Ui};
use crate::{api::ApiClient, error::AppError, models::ProfileInput};

/// Picks the field a server-side error message belongs to, so it can be shown
/// inline. Falls back to a blocking alert when no field can be determined.
pub fn field_for_message(message: &str) -> Option<&'static str> {
    let lowered = message.to_lowercase();
    if lowered.contains("email") {
        Some("email")
    } else if lowered.contains("username") {
        Some("username")
    } else if lowered.contains("password") {
        Some("password")
    } else {
        None
    }
}

pub async fn run(api: &ApiClient, ui: &mut dyn Ui) -> Nav {
    let user = match api.profile().await {
        Ok(user) => user,
        Err(err) if err.is_auth() => return Nav::Login,
        Err(err) => {
            log::error!("profile load failed: {}", err);
            ui.alert(&format!("Failed to load profile: {}", err));
            return Nav::Login;
        }
    };

    let username = ui
        .prompt(&format!("Username [{}]", user.username))
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| user.username.clone());
    let email = ui
        .prompt(&format!("Email [{}]", user.email))
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| user.email.clone());
    let password = ui
        .prompt("New password")
        .map(|p| p.trim().to_string())
        .unwrap_or_default();

    let mut valid = true;
    if !validator::validate_email(&email) {
        ui.field_error("email", "Invalid email");
        valid = false;
    }
    if password.is_empty() {
        ui.field_error("password", "Password is required");
        valid = false;
    } else if password.len() < 6 {
        ui.field_error("password", "Password must be at least 6 characters");
        valid = false;
    }
    if !valid {
        return Nav::Profile;
    }

    let input = ProfileInput {
        username,
        email,
        password,
    };
    match api.update_profile(user.id, &input).await {
        Ok(()) => {
            ui.show("Profile saved");
            Nav::Dashboard
        }
        Err(err) if err.is_auth() => Nav::Login,
        Err(AppError::Validation(message)) => {
            ui.field_error("form", &message);
            Nav::Profile
        }
        Err(AppError::Api { message, .. }) => {
            match field_for_message(&message) {
                Some(field) => ui.field_error(field, &message),
                None => ui.alert(&message),
            }
            Nav::Profile
        }
        Err(err) => {
            log::error!("profile update failed: {}", err);
            ui.alert("Server error. Try again later.");
            Nav::Profile
        }
    }
}
