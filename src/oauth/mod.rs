// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! GitHub OAuth 2.0 client
//!
//! This module implements the provider side of the login flow: building the
//! authorization URL with a per-request CSRF state, exchanging the callback
//! code for an access token, and fetching the authenticated user's profile
//! from the REST API. The token is used for the profile fetch and then
//! dropped; it is never stored.

mod client;
mod error;

pub use client::{GithubOAuthClient, GithubUser};
pub use error::AuthError;
