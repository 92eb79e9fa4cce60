//! Middleware for session validation and route gating

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{AppState, models::Session, session::SESSION_COOKIE};

/// Authenticated user information attached to gated requests
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: uuid::Uuid,
    pub username: String,
    pub email: String,
}

impl From<Session> for CurrentUser {
    fn from(session: Session) -> Self {
        Self {
            id: session.user_id,
            username: session.username,
            email: session.email,
        }
    }
}

/// Resolve the session referenced by the request's cookie, if any
pub async fn session_from_request(state: &AppState, req: &Request) -> Option<Session> {
    let jar = CookieJar::from_headers(req.headers());
    let token = jar.get(SESSION_COOKIE)?.value().to_string();
    state.sessions.validate(&token).await
}

/// Gate for protected routes
///
/// Requests without an active session are redirected to the login entry
/// point; otherwise the session state is attached to the request context.
pub async fn require_authenticated(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match session_from_request(&state, &req).await {
        Some(session) => {
            req.extensions_mut().insert(CurrentUser::from(session));
            next.run(req).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// Gate for login/signup routes
///
/// An already-authenticated client is sent to the protected landing view
/// instead of being allowed to re-submit login or signup.
pub async fn redirect_if_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match session_from_request(&state, &req).await {
        Some(_) => Redirect::to("/dashboard").into_response(),
        None => next.run(req).await,
    }
}
