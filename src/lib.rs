// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! Minimal demonstration web server for GitHub OAuth login.
//!
//! The crate wires a handful of Rocket handlers to an OAuth 2.0
//! authorization-code flow against GitHub and keeps the authenticated
//! identity in a private (signed and encrypted) session cookie. Two HTML
//! pages (home and profile) are rendered depending on login state.
//!
//! Modules:
//! - [`config`]: typed configuration loaded from the environment
//! - [`oauth`]: the GitHub client (authorize URL, token exchange, user info)
//! - [`session`]: the session cookie record and request guard
//! - [`server`]: Rocket builder and route handlers

pub mod config;
pub mod oauth;
pub mod server;
pub mod session;
