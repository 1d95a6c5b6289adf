// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! HTTP route handlers for the login flow
//!
//! Five routes drive the whole application:
//!
//! | Path        | Behavior                                              |
//! |-------------|-------------------------------------------------------|
//! | `/`         | home page, conditioned on login state                 |
//! | `/login`    | 307 redirect to the provider authorization endpoint   |
//! | `/callback` | code→token exchange, user fetch, session write, 303   |
//! | `/profile`  | profile page, or 303 to `/` when anonymous            |
//! | `/logout`   | clear the session, 303 to `/`                         |

use log::{debug, error, info, warn};
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::time::Duration;
use rocket::{get, uri, State};

use super::pages;
use crate::oauth::GithubOAuthClient;
use crate::session::{
    clear_session, load_session, store_session, AuthenticatedUser, UserSession,
};

/// Short-lived cookie carrying the CSRF state of a pending login.
const STATE_COOKIE: &str = "oauth_state";

/// A login not completed within this window is rejected on callback.
const STATE_MAX_AGE: Duration = Duration::minutes(10);

/// Home page.
///
/// Shows a login link to anonymous visitors and profile/logout links to
/// authenticated ones.
#[get("/")]
pub fn index(cookies: &CookieJar<'_>) -> RawHtml<String> {
    let session = load_session(cookies);
    RawHtml(pages::home_page_html(session.as_ref()))
}

/// Start a login: redirect the browser to the provider.
///
/// Generates a fresh random CSRF state for this attempt, stores its secret
/// in a short-lived private cookie, and sends the browser to GitHub's
/// authorization endpoint with a 307. No other server-side record of the
/// pending login exists.
#[get("/login")]
pub fn login(oauth: &State<GithubOAuthClient>, cookies: &CookieJar<'_>) -> Redirect {
    let (authorize_url, csrf_state) = oauth.authorize_url();

    let mut cookie = Cookie::new(STATE_COOKIE, csrf_state.secret().clone());
    cookie.set_http_only(true);
    cookie.set_path("/");
    // Lax so the cookie still accompanies the top-level redirect back from
    // the provider.
    cookie.set_same_site(SameSite::Lax);
    cookie.set_max_age(STATE_MAX_AGE);
    cookies.add_private(cookie);

    debug!("redirecting browser to provider authorization endpoint");
    Redirect::temporary(authorize_url.to_string())
}

/// Provider callback: complete the login.
///
/// Validates the returned `state` against the pending-login cookie (the
/// cookie is consumed either way), exchanges the authorization code for an
/// access token, fetches the user's profile, and only then writes the
/// session. Responds 303 to `/profile` on success, 400 on state or code
/// problems, 500 when either provider call fails.
#[get("/callback?<code>&<state>")]
pub async fn callback(
    code: Option<String>,
    state: Option<String>,
    oauth: &State<GithubOAuthClient>,
    cookies: &CookieJar<'_>,
) -> Result<Redirect, Status> {
    let pending_state = cookies
        .get_private(STATE_COOKIE)
        .map(|cookie| cookie.value().to_string());
    cookies.remove_private(Cookie::build(STATE_COOKIE).path("/"));

    match (&pending_state, &state) {
        (Some(expected), Some(returned)) if expected == returned => {}
        _ => {
            warn!("rejecting callback with missing or mismatched state parameter");
            return Err(Status::BadRequest);
        }
    }

    let code = code.ok_or_else(|| {
        warn!("rejecting callback without authorization code");
        Status::BadRequest
    })?;

    let token = oauth.exchange_code(code).await.map_err(|err| {
        error!("{}", err);
        Status::InternalServerError
    })?;

    let mut user = oauth.fetch_user(&token).await.map_err(|err| {
        error!("{}", err);
        Status::InternalServerError
    })?;

    // Profiles with a private email address report null here; the
    // user:email scope lets us look the address up explicitly. Best-effort.
    if user.email.is_none() {
        match oauth.fetch_primary_email(&token).await {
            Ok(email) => user.email = email,
            Err(err) => debug!("could not fetch email addresses: {}", err),
        }
    }

    let session = UserSession {
        login: user.login,
        name: user.name,
        email: user.email,
        avatar_url: user.avatar_url,
    };
    store_session(cookies, &session);
    info!("user {} logged in", session.login);

    Ok(Redirect::to(uri!(profile)))
}

/// Profile page, for authenticated users only.
///
/// Anonymous visitors are sent back to the home page instead.
#[get("/profile")]
pub fn profile(user: Option<AuthenticatedUser>) -> Result<RawHtml<String>, Redirect> {
    match user {
        Some(AuthenticatedUser(session)) => Ok(RawHtml(pages::profile_page_html(&session))),
        None => Err(Redirect::to(uri!(index))),
    }
}

/// Terminate the session.
///
/// Clears the session cookie and redirects home. No provider-side token
/// revocation is performed; the access token was already discarded after
/// the callback.
#[get("/logout")]
pub fn logout(cookies: &CookieJar<'_>) -> Redirect {
    clear_session(cookies);
    Redirect::to(uri!(index))
}
