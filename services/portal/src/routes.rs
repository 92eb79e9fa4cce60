//! Portal routes and request handlers
//!
//! All request-level failures are converted to rendered pages here; none
//! propagate to the client as raw errors. Storage failures are logged
//! with detail but surfaced only as a generic retry message, never as
//! "Invalid credentials".

use axum::{
    Extension, Form, Json, Router,
    extract::State,
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::{
    AppState,
    error::UserStoreError,
    middleware::{CurrentUser, redirect_if_authenticated, require_authenticated},
    models::NewUser,
    session::SESSION_COOKIE,
    validation, views,
};

/// Login form payload
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Signup form payload
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

/// Create the router for the portal service
pub fn create_router(state: AppState) -> Router {
    let guest_routes = Router::new()
        .route("/login", get(login_form).post(login))
        .route("/signup", get(signup_form).post(signup))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            redirect_if_authenticated,
        ));

    let protected_routes = Router::new()
        .route("/dashboard", get(dashboard))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authenticated,
        ));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/logout", get(logout))
        .merge(guest_routes)
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "portal-service"
    }))
}

/// Home - redirect to dashboard or login
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Redirect {
    let active = match jar.get(SESSION_COOKIE) {
        Some(cookie) => state.sessions.validate(cookie.value()).await.is_some(),
        None => false,
    };

    if active {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

/// Render the login entry form
pub async fn login_form() -> Html<String> {
    Html(views::login_page(None))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<LoginForm>,
) -> Response {
    let identifier = payload.username.trim();

    if identifier.is_empty() {
        return Html(views::login_page(Some("Username or email is required"))).into_response();
    }
    if payload.password.is_empty() {
        return Html(views::login_page(Some("Password is required"))).into_response();
    }

    info!("Login attempt for: {}", identifier);

    let user = match state.user_repository.find_by_identifier(identifier).await {
        Ok(user) => user,
        Err(e) => {
            error!("Database error during login: {}", e);
            return Html(views::login_page(Some("An error occurred. Please try again.")))
                .into_response();
        }
    };

    // Unknown identifier and wrong password collapse to the same message
    let Some(user) = user else {
        return Html(views::login_page(Some("Invalid credentials"))).into_response();
    };

    match state
        .user_repository
        .verify_password(&user, &payload.password)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            return Html(views::login_page(Some("Invalid credentials"))).into_response();
        }
        Err(e) => {
            error!("Password verification error: {}", e);
            return Html(views::login_page(Some("An error occurred. Please try again.")))
                .into_response();
        }
    }

    let token = state
        .sessions
        .issue(user.id, &user.username, &user.email)
        .await;

    (jar.add(session_cookie(token)), Redirect::to("/dashboard")).into_response()
}

/// Render the signup form
pub async fn signup_form() -> Html<String> {
    Html(views::signup_page(None, "", ""))
}

/// User signup endpoint
///
/// On failure the page is re-rendered with the specific violated rule and
/// the submitted username/email preserved; on success the new account is
/// logged in immediately.
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<SignupForm>,
) -> Response {
    let username = payload.username.trim();
    let email = payload.email.trim();

    if let Err(message) =
        validation::validate_signup(username, email, &payload.password, &payload.confirm_password)
    {
        return Html(views::signup_page(Some(&message), username, email)).into_response();
    }

    let new_user = NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: payload.password.clone(),
    };

    let user = match state.user_repository.create(&new_user).await {
        Ok(user) => user,
        Err(e @ (UserStoreError::DuplicateUsername | UserStoreError::DuplicateEmail)) => {
            return Html(views::signup_page(Some(&e.to_string()), username, email))
                .into_response();
        }
        Err(e) => {
            error!("Failed to create account: {}", e);
            return Html(views::signup_page(
                Some("Failed to create account. Please try again."),
                username,
                email,
            ))
            .into_response();
        }
    };

    // Auto-login after signup
    let token = state
        .sessions
        .issue(user.id, &user.username, &user.email)
        .await;

    (jar.add(session_cookie(token)), Redirect::to("/dashboard")).into_response()
}

/// Render the protected landing view
pub async fn dashboard(Extension(user): Extension<CurrentUser>) -> Html<String> {
    Html(views::dashboard_page(&user.username, &user.email))
}

/// Logout endpoint
///
/// Destroys the session unconditionally and always redirects, so logout
/// never appears to fail from the client's perspective.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value()).await;
    }

    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");

    (jar.remove(removal), Redirect::to("/login"))
}

/// Build the session cookie handed to the client
///
/// HttpOnly keeps the reference away from scripts; SameSite restricts it
/// to the intended origin.
fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}
