// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! Application configuration
//!
//! Configuration is read from the process environment at startup and passed
//! explicitly into the server builder; nothing is global. The OAuth
//! credentials and the session-signing secret are required, everything else
//! has compiled defaults that command-line flags may override.
//!
//! Required environment variables:
//! - `GITHUB_CLIENT_ID`: OAuth client identifier registered with GitHub
//! - `GITHUB_CLIENT_SECRET`: matching client secret
//! - `SESSION_SECRET`: secret the session cookies are signed/encrypted with

pub mod github;

pub use github::GithubConfig;

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Errors raised while assembling the configuration.
///
/// These are fatal: `main` propagates them and the process exits before the
/// server binds its port.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set or empty")]
    MissingVar(&'static str),
}

/// Network binding for the web server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The network address the server will bind to. Default is "127.0.0.1".
    #[serde(default = "default_address")]
    pub address: String,

    /// The TCP port the server will listen on. Default is 8080.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Web server binding.
    #[serde(default)]
    pub server: ServerConfig,

    /// GitHub OAuth provider settings.
    pub github: GithubConfig,

    /// Secret the Rocket private-cookie key is derived from.
    pub session_secret: String,
}

impl Config {
    /// Load the configuration from the process environment.
    ///
    /// Fails with [`ConfigError::MissingVar`] when a required variable is
    /// absent or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|key| env::var(key).ok())
    }

    /// Load the configuration through an injectable variable lookup.
    ///
    /// Unit tests supply a closure over a map instead of mutating the
    /// process environment.
    pub fn load<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        let client_id = require("GITHUB_CLIENT_ID")?;
        let client_secret = require("GITHUB_CLIENT_SECRET")?;
        let session_secret = require("SESSION_SECRET")?;

        Ok(Self {
            server: ServerConfig::default(),
            github: GithubConfig {
                client_id,
                client_secret,
                ..GithubConfig::default()
            },
            session_secret,
        })
    }

    /// Apply command line overrides to the loaded configuration.
    pub fn apply_args(&mut self, address: Option<String>, port: Option<u16>) {
        if let Some(address) = address {
            self.server.address = address;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }
}
