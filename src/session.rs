// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! Cookie-backed session handling
//!
//! The session lives entirely in the browser: a [`UserSession`] record is
//! serialized to JSON, base64-encoded, and stored in a Rocket *private*
//! cookie, which the framework signs and encrypts with the server's secret
//! key. A request without the cookie, or with one that fails decryption or
//! decoding, is simply anonymous; session lookup never errors.
//!
//! Presence of the cookie (and a decodable `login`) is what distinguishes
//! an authenticated browser from an anonymous one.

use base64::Engine;
use log::debug;
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::request::{FromRequest, Outcome};
use rocket::time::Duration;
use serde::{Deserialize, Serialize};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "user_session";

/// Session cookies outlive the browser session but not indefinitely.
const SESSION_MAX_AGE: Duration = Duration::hours(24);

/// Identity of an authenticated user, as stored in the session cookie.
///
/// A concrete record with named fields; only `login` is mandatory, the
/// remaining profile fields mirror what GitHub may leave unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    /// Provider login handle. Present exactly when the user is authenticated.
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Request guard for routes that require an authenticated session.
///
/// Forwards (rather than failing) when no valid session cookie is present,
/// so handlers can take `Option<AuthenticatedUser>` and decide themselves
/// how to treat anonymous visitors.
pub struct AuthenticatedUser(pub UserSession);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();

    async fn from_request(request: &'r rocket::Request<'_>) -> Outcome<Self, Self::Error> {
        let cookies = request.cookies();

        if let Some(cookie) = cookies.get_private(SESSION_COOKIE) {
            if let Some(session) = decode_user_session(cookie.value()) {
                debug!("authenticated session for {}", session.login);
                return Outcome::Success(AuthenticatedUser(session));
            }
            debug!("session cookie present but not decodable, treating as anonymous");
        }
        Outcome::Forward(Status::Unauthorized)
    }
}

/// Encode a session record into a cookie value (base64 over JSON).
pub fn encode_user_session(session: &UserSession) -> String {
    let json = serde_json::to_string(session).expect("session record serializes to JSON");
    base64::engine::general_purpose::STANDARD.encode(json)
}

/// Decode a cookie value back into a session record.
///
/// Returns `None` on any malformation: invalid base64, malformed JSON, or
/// a missing `login` field.
pub fn decode_user_session(cookie_value: &str) -> Option<UserSession> {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(cookie_value)
        .ok()?;
    serde_json::from_slice(&decoded).ok()
}

/// Read the session bound to this request, if any.
pub fn load_session(cookies: &CookieJar<'_>) -> Option<UserSession> {
    cookies
        .get_private(SESSION_COOKIE)
        .and_then(|cookie| decode_user_session(cookie.value()))
}

/// Persist the session into the outgoing response as a private cookie.
pub fn store_session(cookies: &CookieJar<'_>, session: &UserSession) {
    let mut cookie = Cookie::new(SESSION_COOKIE, encode_user_session(session));
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(SESSION_MAX_AGE);
    cookies.add_private(cookie);
}

/// Remove the session cookie, returning the browser to the anonymous state.
pub fn clear_session(cookies: &CookieJar<'_>) {
    cookies.remove_private(Cookie::build(SESSION_COOKIE).path("/"));
}
