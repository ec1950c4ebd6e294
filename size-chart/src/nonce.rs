use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};

const SEPARATOR: [u8; 1] = [0x1f];
const TOKEN_BYTES: usize = 12;

/// Opaque id of a shopper's browser session, carried in a private cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SessionId(String);

impl SessionId {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mints and checks anti-forgery tokens.
///
/// A token is bound to a session, an action name and a tick. A tick is half the token
/// lifetime and tokens from the current and the previous tick are accepted, so a token
/// lives between one half and one full lifetime.
#[derive(Clone)]
pub(crate) struct NonceService {
    secret: Arc<[u8]>,
    tick_secs: i64,
}

impl NonceService {
    pub(crate) fn new(secret: &[u8], lifetime: Duration) -> Self {
        let tick_secs = i64::try_from(lifetime.as_secs() / 2).unwrap_or(i64::MAX).max(1);
        Self {
            secret: Arc::from(secret),
            tick_secs,
        }
    }

    pub(crate) fn create(&self, session: &SessionId, action: &str) -> String {
        self.create_at(session, action, chrono::Utc::now().timestamp())
    }

    pub(crate) fn verify(&self, session: &SessionId, action: &str, token: &str) -> bool {
        self.verify_at(session, action, token, chrono::Utc::now().timestamp())
    }

    pub(crate) fn create_at(&self, session: &SessionId, action: &str, now: i64) -> String {
        self.token_for_tick(self.tick(now), action, session)
    }

    pub(crate) fn verify_at(
        &self,
        session: &SessionId,
        action: &str,
        token: &str,
        now: i64,
    ) -> bool {
        if session.as_str().is_empty() || token.is_empty() {
            return false;
        }
        let tick = self.tick(now);
        [tick, tick - 1].into_iter().any(|tick| {
            let expected = self.token_for_tick(tick, action, session);
            constant_time_eq(expected.as_bytes(), token.as_bytes())
        })
    }

    fn tick(&self, now: i64) -> i64 {
        now.div_euclid(self.tick_secs)
    }

    fn token_for_tick(&self, tick: i64, action: &str, session: &SessionId) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update(SEPARATOR);
        hasher.update(tick.to_be_bytes());
        hasher.update(SEPARATOR);
        hasher.update(action.as_bytes());
        hasher.update(SEPARATOR);
        hasher.update(session.as_str().as_bytes());
        let digest = hasher.finalize();
        URL_SAFE_NO_PAD.encode(&digest[..TOKEN_BYTES])
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
