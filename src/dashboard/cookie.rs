//! Session cookie middleware

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "churn_session";

/// Session of the current request, inserted by [`session_middleware`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

/// Attach a session id to every request, issuing a new cookie when the
/// browser didn't send a valid one
pub async fn session_middleware(mut request: Request<Body>, next: Next) -> Response {
    let existing = session_from_cookies(request.headers());
    let id = existing.unwrap_or_else(Uuid::new_v4);
    request.extensions_mut().insert(SessionId(id));

    let mut response = next.run(request).await;

    if existing.is_none() {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

fn session_from_cookies(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}
