// ABOUTME: Server-rendered HTML pages for browser users
// ABOUTME: Home, login, register, and logout backed by an HttpOnly session cookie
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Web pages
//!
//! Form posts go through the same [`AuthService`](crate::services::AuthService)
//! as the JSON API. A successful login or registration stores the JWT in the
//! `auth_token` cookie and redirects to `/` with `303 See Other`; a failure
//! re-renders the form with the error message.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::{
        header::{CONTENT_TYPE, LOCATION, SET_COOKIE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::get,
    Form, Router,
};
use calorie_core::constants::{auth::AUTH_COOKIE_NAME, service};
use calorie_core::errors::AppError;
use calorie_core::models::{UserLogin, UserSignUp};
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::{debug, warn};

use crate::resources::ServerResources;
use crate::security::cookies::{auth_cookie, clear_auth_cookie, get_cookie_value};

/// HTML page routes
pub struct WebRoutes;

impl WebRoutes {
    /// Create all page routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_home))
            .route(
                "/login",
                get(Self::handle_login_page).post(Self::handle_login_submit),
            )
            .route(
                "/register",
                get(Self::handle_register_page).post(Self::handle_register_submit),
            )
            .route("/logout", get(Self::handle_logout))
            .with_state(resources)
    }

    /// Home page; greets the user when the session cookie is valid
    async fn handle_home(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Response {
        let user = match get_cookie_value(&headers, AUTH_COOKIE_NAME) {
            Some(token) => match resources.auth_service().authenticate_token(&token).await {
                Ok(user) => Some(user),
                Err(e) => {
                    debug!("Ignoring invalid session cookie: {e}");
                    None
                }
            },
            None => None,
        };

        let body = user.map_or_else(
            || {
                r#"<p>Track what you eat with nutrition data from FatSecret.</p>
<p><a href="/login">Log in</a> or <a href="/register">create an account</a>.</p>"#
                    .to_owned()
            },
            |user| {
                format!(
                    r#"<p>Welcome back, {}!</p>
<p>Signed in as {}.</p>
<p><a href="/logout">Log out</a></p>"#,
                    encode_text(&user.name),
                    encode_text(&user.email)
                )
            },
        );

        html_response(StatusCode::OK, &page("Home", &body))
    }

    async fn handle_login_page() -> Response {
        html_response(StatusCode::OK, &login_page(None, ""))
    }

    async fn handle_register_page() -> Response {
        html_response(StatusCode::OK, &register_page(None, "", ""))
    }

    /// Handle the login form
    async fn handle_login_submit(
        State(resources): State<Arc<ServerResources>>,
        form: Result<Form<UserLogin>, FormRejection>,
    ) -> Response {
        let Form(input) = match form {
            Ok(form) => form,
            Err(rejection) => {
                return html_response(
                    StatusCode::BAD_REQUEST,
                    &login_page(Some(&rejection.body_text()), ""),
                );
            }
        };

        let email = input.email.clone();
        match resources.auth_service().login(input).await {
            Ok(auth) => redirect_with_cookie("/", &auth_cookie(&auth.token)),
            Err(e) => {
                warn!("Web login failed for {email}: {e}");
                html_response(error_status(&e), &login_page(Some(&e.message), &email))
            }
        }
    }

    /// Handle the registration form
    async fn handle_register_submit(
        State(resources): State<Arc<ServerResources>>,
        form: Result<Form<UserSignUp>, FormRejection>,
    ) -> Response {
        let Form(input) = match form {
            Ok(form) => form,
            Err(rejection) => {
                return html_response(
                    StatusCode::BAD_REQUEST,
                    &register_page(Some(&rejection.body_text()), "", ""),
                );
            }
        };

        let email = input.email.clone();
        let name = input.name.clone();
        match resources.auth_service().sign_up(input).await {
            Ok(auth) => redirect_with_cookie("/", &auth_cookie(&auth.token)),
            Err(e) => {
                warn!("Web registration failed for {email}: {e}");
                html_response(
                    error_status(&e),
                    &register_page(Some(&e.message), &email, &name),
                )
            }
        }
    }

    async fn handle_logout() -> Response {
        redirect_with_cookie("/login", &clear_auth_cookie())
    }
}

fn error_status(error: &AppError) -> StatusCode {
    StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn html_response(status: StatusCode, html: &str) -> Response {
    (
        status,
        [(CONTENT_TYPE, "text/html; charset=utf-8")],
        html.to_owned(),
    )
        .into_response()
}

fn redirect_with_cookie(location: &'static str, cookie: &str) -> Response {
    (
        StatusCode::SEE_OTHER,
        [(LOCATION, location.to_owned()), (SET_COOKIE, cookie.to_owned())],
    )
        .into_response()
}

fn error_banner(error: Option<&str>) -> String {
    error.map_or_else(String::new, |message| {
        format!(r#"<div class="error">{}</div>"#, encode_text(message))
    })
}

fn login_page(error: Option<&str>, email: &str) -> String {
    let body = format!(
        r#"{}
<form method="post" action="/login">
    <label>Email <input type="email" name="email" value="{}" required></label>
    <label>Password <input type="password" name="password" required></label>
    <button type="submit">Log in</button>
</form>
<p>No account yet? <a href="/register">Register</a></p>"#,
        error_banner(error),
        encode_double_quoted_attribute(email)
    );
    page("Login", &body)
}

fn register_page(error: Option<&str>, email: &str, name: &str) -> String {
    let body = format!(
        r#"{}
<form method="post" action="/register">
    <label>Name <input type="text" name="name" value="{}" required></label>
    <label>Email <input type="email" name="email" value="{}" required></label>
    <label>Password <input type="password" name="password" minlength="6" required></label>
    <button type="submit">Create account</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
        error_banner(error),
        encode_double_quoted_attribute(name),
        encode_double_quoted_attribute(email)
    );
    page("Register", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title} - CalorieCompass</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; max-width: 480px; }}
        label {{ display: block; margin-bottom: 12px; }}
        .error {{ color: red; background-color: #ffe6e6; padding: 15px; border-radius: 4px; margin-bottom: 20px; }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    {body}
    <footer><small>{} v{}</small></footer>
</body>
</html>
"#,
        service::APP_NAME,
        service::VERSION
    )
}
