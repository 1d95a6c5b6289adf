// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! Configured OAuth2 client for GitHub

use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use oauth2::basic::BasicClient;
use oauth2::url::Url;
use oauth2::{
    AccessToken, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet,
    EndpointSet, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::config::GithubConfig;
use crate::oauth::AuthError;

/// Outbound calls must not hang on an unresponsive provider.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Profile of the authenticated user as returned by `GET /user`.
///
/// GitHub reports unset profile fields as JSON `null`, hence the options.
/// The record is transient: selected fields are copied into the session and
/// the rest is discarded.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub id: i64,
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// One entry of the `GET /user/emails` response.
#[derive(Debug, Deserialize)]
struct GithubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

/// OAuth2 client bound to a single GitHub application.
///
/// Built once at startup from [`GithubConfig`] and injected into Rocket's
/// managed state; read-only afterwards.
pub struct GithubOAuthClient {
    oauth: ConfiguredClient,
    http: reqwest::Client,
    api_base_url: String,
    scope: String,
}

impl GithubOAuthClient {
    /// Construct the client from the provider configuration.
    pub fn from_config(config: &GithubConfig) -> Result<Self> {
        let oauth = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(
                AuthUrl::new(config.auth_url.clone()).context("invalid authorization URL")?,
            )
            .set_token_uri(TokenUrl::new(config.token_url.clone()).context("invalid token URL")?)
            .set_redirect_uri(
                RedirectUrl::new(config.redirect_url.clone()).context("invalid redirect URL")?,
            );

        // Following redirects on OAuth endpoints opens up SSRF, so disable them.
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(HTTP_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            oauth,
            http,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            scope: config.scope.clone(),
        })
    }

    /// Build the provider authorization URL for a new login attempt.
    ///
    /// Returns the URL to redirect the browser to and the freshly generated
    /// CSRF state the caller must persist for callback validation.
    pub fn authorize_url(&self) -> (Url, CsrfToken) {
        self.oauth
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new(self.scope.clone()))
            .url()
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(&self, code: String) -> Result<AccessToken, AuthError> {
        let token = self
            .oauth
            .exchange_code(AuthorizationCode::new(code))
            .request_async(&self.http)
            .await
            .map_err(|err| AuthError::TokenExchange(err.to_string()))?;
        Ok(token.access_token().clone())
    }

    /// Fetch the authenticated user's profile from the user-info endpoint.
    pub async fn fetch_user(&self, token: &AccessToken) -> Result<GithubUser, AuthError> {
        let body = self
            .http
            .get(format!("{}/user", self.api_base_url))
            .bearer_auth(token.secret())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|err| AuthError::UserFetch(err.to_string()))?
            .error_for_status()
            .map_err(|err| AuthError::UserFetch(err.to_string()))?
            .text()
            .await
            .map_err(|err| AuthError::UserFetch(err.to_string()))?;

        let user: GithubUser = serde_json::from_str(&body)?;
        debug!("fetched profile for {}", user.login);
        Ok(user)
    }

    /// Look up the user's primary verified email address.
    ///
    /// The `user:email` scope grants access to addresses the user keeps off
    /// their public profile, where `GET /user` returns `email: null`.
    pub async fn fetch_primary_email(&self, token: &AccessToken) -> Result<Option<String>, AuthError> {
        let body = self
            .http
            .get(format!("{}/user/emails", self.api_base_url))
            .bearer_auth(token.secret())
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|err| AuthError::UserFetch(err.to_string()))?
            .error_for_status()
            .map_err(|err| AuthError::UserFetch(err.to_string()))?
            .text()
            .await
            .map_err(|err| AuthError::UserFetch(err.to_string()))?;

        let addresses: Vec<GithubEmail> = serde_json::from_str(&body)?;
        Ok(addresses
            .into_iter()
            .find(|entry| entry.primary && entry.verified)
            .map(|entry| entry.email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GithubOAuthClient {
        let config = GithubConfig {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            ..GithubConfig::default()
        };
        GithubOAuthClient::from_config(&config).expect("valid configuration")
    }

    #[test]
    fn authorize_url_carries_oauth_parameters() {
        let client = test_client();
        let (url, state) = client.authorize_url();

        assert_eq!(url.host_str(), Some("github.com"));
        assert_eq!(url.path(), "/login/oauth/authorize");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert!(pairs.contains(&("client_id".to_string(), "test-client-id".to_string())));
        assert!(pairs.contains(&("scope".to_string(), "user:email".to_string())));
        assert!(pairs.contains(&(
            "redirect_uri".to_string(),
            "http://localhost:8080/callback".to_string()
        )));
        assert!(pairs
            .iter()
            .any(|(k, v)| k == "state" && v == state.secret()));
    }

    #[test]
    fn authorize_url_state_is_fresh_per_request() {
        let client = test_client();
        let (_, first) = client.authorize_url();
        let (_, second) = client.authorize_url();
        assert_ne!(first.secret(), second.secret());
    }

    #[test]
    fn from_config_rejects_malformed_endpoint() {
        let config = GithubConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            auth_url: "not a url".to_string(),
            ..GithubConfig::default()
        };
        assert!(GithubOAuthClient::from_config(&config).is_err());
    }
}
