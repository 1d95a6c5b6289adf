// Copyright (c) 2025 the github-oauth-demo authors
// This file is part of the github-oauth-demo project and is licensed under the
// MIT License (see LICENSE.md for details).

//! Session isolation between independent cookie jars.
//!
//! Uses an untracked local client and replays cookies by hand, so two
//! simulated browsers can log in against the same server instance without
//! sharing state.

use rocket::http::{Cookie, Status};
use rocket::local::asynchronous::{Client, LocalResponse};
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use github_oauth_demo::config::{Config, GithubConfig, ServerConfig};
use github_oauth_demo::server;

fn test_config(provider_base: &str) -> Config {
    Config {
        server: ServerConfig::default(),
        session_secret: "test-session-secret".to_string(),
        github: GithubConfig {
            client_id: "test-client-id".to_string(),
            client_secret: "test-client-secret".to_string(),
            auth_url: format!("{provider_base}/login/oauth/authorize"),
            token_url: format!("{provider_base}/login/oauth/access_token"),
            api_base_url: provider_base.to_string(),
            ..GithubConfig::default()
        },
    }
}

/// Extract a named cookie from the response as a bare name=value pair,
/// the way a browser would send it back.
fn response_cookie(response: &LocalResponse<'_>, name: &str) -> Option<Cookie<'static>> {
    response.headers().get("Set-Cookie").find_map(|raw| {
        let parsed = Cookie::parse_encoded(raw.to_string()).ok()?;
        if parsed.name() == name {
            Some(Cookie::new(
                parsed.name().to_string(),
                parsed.value().to_string(),
            ))
        } else {
            None
        }
    })
}

fn state_param(location: &str) -> String {
    let url = Url::parse(location).expect("valid authorization URL");
    url.query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.to_string())
        .expect("state parameter")
}

/// Log one simulated browser in and return its session cookie.
async fn log_in(client: &Client, mock: &MockServer, user: Value) -> Cookie<'static> {
    mock.reset().await;
    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "gho_test_token",
            "token_type": "bearer",
            "scope": "user:email"
        })))
        .mount(mock)
        .await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user))
        .mount(mock)
        .await;

    let response = client.get("/login").dispatch().await;
    assert_eq!(response.status(), Status::TemporaryRedirect);
    let location = response
        .headers()
        .get_one("Location")
        .expect("redirect location")
        .to_string();
    let state = state_param(&location);
    let state_cookie = response_cookie(&response, "oauth_state").expect("state cookie");

    let response = client
        .get(format!("/callback?code=test-code&state={state}"))
        .cookie(state_cookie)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::SeeOther);
    response_cookie(&response, "user_session").expect("session cookie")
}

#[rocket::async_test]
async fn independent_cookie_jars_never_observe_each_other() {
    let mock = MockServer::start().await;
    let config = test_config(&mock.uri());
    let figment = server::server_figment(&config)
        .merge(("port", 0))
        .merge(("log_level", rocket::config::LogLevel::Off));
    let rocket = server::build_rocket(figment, &config).expect("valid configuration");
    let client = Client::untracked(rocket).await.expect("valid rocket instance");

    let alice_cookie = log_in(
        &client,
        &mock,
        json!({ "id": 1, "login": "alice", "name": "Alice", "email": "a@x.com", "avatar_url": null }),
    )
    .await;
    let bob_cookie = log_in(
        &client,
        &mock,
        json!({ "id": 2, "login": "bob", "name": "Bob", "email": "b@y.com", "avatar_url": null }),
    )
    .await;

    let response = client
        .get("/profile")
        .cookie(alice_cookie.clone())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.expect("html body");
    assert!(body.contains("alice"));
    assert!(!body.contains("bob"));

    let response = client.get("/profile").cookie(bob_cookie).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.expect("html body");
    assert!(body.contains("bob"));
    assert!(!body.contains("alice"));

    // Bob's login did not disturb Alice's earlier session.
    let response = client.get("/profile").cookie(alice_cookie).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = response.into_string().await.expect("html body");
    assert!(body.contains("alice"));
}
