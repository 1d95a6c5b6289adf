// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! HTML page rendering
//!
//! The two pages are handlebars templates embedded into the binary from
//! `resources/templates/`. Handlebars escapes interpolated values, so
//! profile fields coming from the provider are safe to render directly.

use handlebars::Handlebars;
use serde_json::json;

use crate::session::UserSession;

/// Render the home page.
///
/// `session` is `None` for anonymous visitors.
pub fn home_page_html(session: Option<&UserSession>) -> String {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string("home", include_str!("../../resources/templates/home.hbs"))
        .expect("Failed to register home template");

    let data = json!({
        "user": session.map(|s| s.login.as_str()),
    });

    handlebars
        .render("home", &data)
        .expect("Failed to render home template")
}

/// Render the profile page for an authenticated user.
pub fn profile_page_html(session: &UserSession) -> String {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string(
            "profile",
            include_str!("../../resources/templates/profile.hbs"),
        )
        .expect("Failed to register profile template");

    let data = json!({
        "user": session.login,
        "name": session.name,
        "email": session.email,
        "avatar_url": session.avatar_url,
    });

    handlebars
        .render("profile", &data)
        .expect("Failed to render profile template")
}
