// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! Error taxonomy for the OAuth callback sequence

use thiserror::Error;

/// Failures of the two outbound provider calls made during a callback.
///
/// None of these are retried; the handler logs the error and answers the
/// browser with a plain 500. The session is only written after the whole
/// sequence succeeds, so a failing callback never leaves a partial session.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint rejected the authorization code or was unreachable.
    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    /// The user-info request failed at the transport or HTTP level.
    #[error("failed to fetch user profile: {0}")]
    UserFetch(String),

    /// The user-info response body was not the expected JSON shape.
    #[error("failed to decode user profile: {0}")]
    Decode(#[from] serde_json::Error),
}
