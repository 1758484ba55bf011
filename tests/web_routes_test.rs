// ABOUTME: HTTP integration tests for the server-rendered HTML pages
// ABOUTME: Covers form login/registration, the session cookie, and logout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use common::StubFoodSource;
use helpers::axum_test::AxumTestRequest;

fn session_token(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("auth_token="))
        .expect("auth_token cookie")
        .to_owned()
}

async fn register(app: &axum::Router, email: &str, name: &str) -> String {
    let response = AxumTestRequest::post("/register")
        .form(&[("email", email), ("password", "hunter22"), ("name", name)])
        .send(app.clone())
        .await;

    assert_eq!(response.status(), 303);
    assert_eq!(response.header("location").as_deref(), Some("/"));
    response.header("set-cookie").expect("session cookie")
}

#[tokio::test]
async fn test_pages_render_forms() {
    let app = common::create_test_app(StubFoodSource::new()).await;

    let login = AxumTestRequest::get("/login").send(app.clone()).await;
    assert_eq!(login.status(), 200);
    assert!(login
        .header("content-type")
        .unwrap()
        .starts_with("text/html"));
    assert!(login.text().contains("action=\"/login\""));

    let register = AxumTestRequest::get("/register").send(app).await;
    assert_eq!(register.status(), 200);
    assert!(register.text().contains("name=\"name\""));
}

#[tokio::test]
async fn test_register_sets_http_only_cookie() {
    let app = common::create_test_app(StubFoodSource::new()).await;

    let cookie = register(&app, "ada@example.com", "Ada").await;

    assert!(cookie.starts_with("auth_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=86400"));
}

#[tokio::test]
async fn test_home_greets_signed_in_user_with_escaped_name() {
    let app = common::create_test_app(StubFoodSource::new()).await;
    let cookie = register(&app, "ada@example.com", "<b>Ada</b>").await;
    let token = session_token(&cookie);

    let response = AxumTestRequest::get("/")
        .header("cookie", &format!("auth_token={token}"))
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
    let html = response.text();
    assert!(html.contains("Welcome back, &lt;b&gt;Ada&lt;/b&gt;!"));
    assert!(!html.contains("<b>Ada</b>"));
}

#[tokio::test]
async fn test_home_without_session_shows_links() {
    let app = common::create_test_app(StubFoodSource::new()).await;

    let anonymous = AxumTestRequest::get("/").send(app.clone()).await;
    let bad_cookie = AxumTestRequest::get("/")
        .header("cookie", "auth_token=garbage")
        .send(app)
        .await;

    for response in [anonymous, bad_cookie] {
        assert_eq!(response.status(), 200);
        let html = response.text();
        assert!(html.contains("href=\"/login\""));
        assert!(!html.contains("Welcome back"));
    }
}

#[tokio::test]
async fn test_login_form_success_and_failure() {
    let app = common::create_test_app(StubFoodSource::new()).await;
    register(&app, "ada@example.com", "Ada").await;

    let ok = AxumTestRequest::post("/login")
        .form(&[("email", "ada@example.com"), ("password", "hunter22")])
        .send(app.clone())
        .await;
    assert_eq!(ok.status(), 303);
    assert_eq!(ok.header("location").as_deref(), Some("/"));
    assert!(ok.header("set-cookie").unwrap().starts_with("auth_token="));

    let failed = AxumTestRequest::post("/login")
        .form(&[("email", "ada@example.com"), ("password", "nope-nope")])
        .send(app)
        .await;
    assert_eq!(failed.status(), 401);
    assert!(failed.header("set-cookie").is_none());
    let html = failed.text();
    assert!(html.contains("invalid email or password"));
    assert!(html.contains("value=\"ada@example.com\""));
}

#[tokio::test]
async fn test_register_form_errors_rerender() {
    let app = common::create_test_app(StubFoodSource::new()).await;
    register(&app, "ada@example.com", "Ada").await;

    let duplicate = AxumTestRequest::post("/register")
        .form(&[
            ("email", "ada@example.com"),
            ("password", "hunter22"),
            ("name", "Ada"),
        ])
        .send(app.clone())
        .await;
    assert_eq!(duplicate.status(), 409);
    assert!(duplicate.text().contains("class=\"error\""));

    let missing_fields = AxumTestRequest::post("/register")
        .form(&[("email", "grace@example.com")])
        .send(app)
        .await;
    assert_eq!(missing_fields.status(), 400);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = common::create_test_app(StubFoodSource::new()).await;

    let response = AxumTestRequest::get("/logout").send(app).await;

    assert_eq!(response.status(), 303);
    assert_eq!(response.header("location").as_deref(), Some("/login"));
    let cookie = response.header("set-cookie").unwrap();
    assert!(cookie.starts_with("auth_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_session_cookie_authenticates_json_user_route() {
    let app = common::create_test_app(StubFoodSource::new()).await;
    let cookie = register(&app, "ada@example.com", "Ada").await;
    let token = session_token(&cookie);

    let response = AxumTestRequest::get("/user")
        .header("cookie", &format!("auth_token={token}"))
        .send(app)
        .await;

    assert_eq!(response.status(), 200);
}
