//!
//! # Login and Registration
//!
//! Collects credentials, calls the auth endpoints, persists the issued token
//! pair and moves on to the dashboard. Presence and email-format checks run
//! before any network call; their failures are shown inline and produce no
//! traffic.

use super::{Nav, Ui};
use crate::{
    api::ApiClient,
    error::AppError,
    models::{LoginInput, RegisterInput},
};

/// Entry screen: choose between logging in and registering.
pub async fn run(api: &ApiClient, ui: &mut dyn Ui) -> Nav {
    ui.show("== taskdeck ==");
    let choice = match ui.prompt("[l]ogin, [r]egister or [q]uit") {
        Some(choice) => choice,
        None => return Nav::Quit,
    };
    match choice.trim() {
        "l" | "login" => login(api, ui).await,
        "r" | "register" => register(api, ui).await,
        "q" | "quit" => Nav::Quit,
        _ => Nav::Login,
    }
}

pub async fn login(api: &ApiClient, ui: &mut dyn Ui) -> Nav {
    let email = match ui.prompt("Email") {
        Some(email) => email.trim().to_string(),
        None => return Nav::Quit,
    };
    let password = match ui.prompt("Password") {
        Some(password) => password.trim().to_string(),
        None => return Nav::Quit,
    };

    let mut valid = true;
    if email.is_empty() {
        ui.field_error("email", "Email is required");
        valid = false;
    } else if !validator::validate_email(&email) {
        ui.field_error("email", "Invalid email");
        valid = false;
    }
    if password.is_empty() {
        ui.field_error("password", "Password is required");
        valid = false;
    }
    if !valid {
        return Nav::Login;
    }

    match api.login(&LoginInput { email, password }).await {
        Ok(_) => Nav::Dashboard,
        Err(AppError::Api { message, .. }) => {
            ui.field_error("form", &message);
            Nav::Login
        }
        Err(AppError::Network(err)) => {
            log::error!("login failed: {}", err);
            ui.field_error("form", "Server error. Try again later.");
            Nav::Login
        }
        Err(err) => {
            ui.field_error("form", &err.to_string());
            Nav::Login
        }
    }
}

pub async fn register(api: &ApiClient, ui: &mut dyn Ui) -> Nav {
    let username = match ui.prompt("Username") {
        Some(username) => username.trim().to_string(),
        None => return Nav::Quit,
    };
    let email = match ui.prompt("Email") {
        Some(email) => email.trim().to_string(),
        None => return Nav::Quit,
    };
    let password = match ui.prompt("Password") {
        Some(password) => password.trim().to_string(),
        None => return Nav::Quit,
    };

    let input = RegisterInput {
        username,
        email,
        password,
    };
    match api.register(&input).await {
        // Registration stores the token pair, so the user is logged in.
        Ok(_) => Nav::Dashboard,
        Err(AppError::Validation(message)) => {
            ui.field_error("form", &message);
            Nav::Login
        }
        Err(AppError::Api { message, .. }) => {
            ui.field_error("form", &message);
            Nav::Login
        }
        Err(err) => {
            log::error!("registration failed: {}", err);
            ui.alert("Registration failed. Try again later.");
            Nav::Login
        }
    }
}
