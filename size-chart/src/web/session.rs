use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    PrivateCookieJar,
};
use tracing::debug;
use uuid::Uuid;

use crate::nonce::SessionId;

pub(crate) const SESSION_COOKIE: &str = "size_chart_session";

/// The session the request belongs to, if the browser sent one.
pub(crate) fn current_session(jar: &PrivateCookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|id| !id.is_empty())
        .map(SessionId::new)
}

/// Reuses the request's session or starts a new one, returning the jar that has to be sent
/// back with the response.
pub(crate) fn ensure_session(jar: PrivateCookieJar) -> (PrivateCookieJar, SessionId) {
    if let Some(session) = current_session(&jar) {
        return (jar, session);
    }
    let session = SessionId::new(Uuid::new_v4().to_string());
    debug!("starting shopper session {session}");
    let cookie = Cookie::build((SESSION_COOKIE, session.as_str().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), session)
}
