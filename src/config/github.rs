// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! # GitHub OAuth2 provider configuration
//!
//! This module defines the [`GithubConfig`] struct, which holds all
//! parameters required to drive the OAuth2 authorization-code flow against
//! GitHub: the registered client credentials, the callback URL, the
//! requested scope, and the provider endpoints.
//!
//! The endpoint URLs default to the public GitHub service. They are plain
//! fields rather than constants so integration tests can point the flow at
//! a local fake provider.

use serde::{Deserialize, Serialize};

/// Configuration for the GitHub OAuth2 provider.
///
/// `client_id` and `client_secret` come from the environment (see
/// [`Config::load`](super::Config::load)); the remaining fields carry the
/// compiled defaults for the demo deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// OAuth2 client ID registered with GitHub.
    pub client_id: String,

    /// OAuth2 client secret registered with GitHub.
    pub client_secret: String,

    /// Redirect URI registered for OAuth2 callbacks.
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,

    /// Space-separated list of OAuth2 scopes to request.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Authorization endpoint the browser is redirected to.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Token endpoint authorization codes are exchanged at.
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Base URL for the provider's REST API (user-info endpoint).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_redirect_url() -> String {
    "http://localhost:8080/callback".to_string()
}

fn default_scope() -> String {
    "user:email".to_string()
}

fn default_auth_url() -> String {
    "https://github.com/login/oauth/authorize".to_string()
}

fn default_token_url() -> String {
    "https://github.com/login/oauth/access_token".to_string()
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_url: default_redirect_url(),
            scope: default_scope(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            api_base_url: default_api_base_url(),
        }
    }
}
