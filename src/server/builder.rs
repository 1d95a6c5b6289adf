// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! Rocket server builder and configuration
//!
//! This module provides functions to build and configure the Rocket server
//! instance with its routes and managed state. Configuration is passed in
//! explicitly; there are no process-wide singletons, which keeps server
//! construction in tests isolated.

use anyhow::Result;
use base64::Engine;
use rocket::figment::Figment;
use rocket::{routes, Build, Rocket};
use sha2::{Digest, Sha256};

use super::handlers::{callback, index, login, logout, profile};
use crate::config::Config;
use crate::oauth::GithubOAuthClient;

/// Build the Rocket figment for the given configuration.
///
/// Merges the server binding and a `secret_key` derived from the
/// session-signing secret. Rocket requires a 256-bit base64 key for its
/// private cookies, so the free-form `SESSION_SECRET` value is run through
/// SHA-256 first.
pub fn server_figment(config: &Config) -> Figment {
    let digest = Sha256::digest(config.session_secret.as_bytes());
    let secret_key = base64::engine::general_purpose::STANDARD.encode(digest);

    rocket::Config::figment()
        .merge(("address", config.server.address.clone()))
        .merge(("port", config.server.port))
        .merge(("secret_key", secret_key))
}

/// Build a configured Rocket server instance.
///
/// Mounts the five login-flow routes and injects the configured OAuth
/// client as managed state; the handlers need nothing else from the
/// configuration at request time.
///
/// ### Errors
///
/// Fails when the provider configuration contains malformed endpoint URLs.
pub fn build_rocket(figment: Figment, config: &Config) -> Result<Rocket<Build>> {
    let oauth_client = GithubOAuthClient::from_config(&config.github)?;

    Ok(rocket::custom(figment)
        .mount("/", routes![index, login, callback, profile, logout])
        .manage(oauth_client))
}
