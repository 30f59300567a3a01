//! Client-side session gate
//!
//! Routes between authenticated and anonymous views based on the locally
//! stored token. The gate only reads the token's expiry claim; it never
//! verifies the signature and never talks to the backend, so it is advisory:
//! the server's auth middleware remains the authoritative check. An expired
//! or undecodable token is proactively cleared from the store.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Storage key under which the session token lives
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Key-value store holding the session token, localStorage-style
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, String>>,
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}

/// Access class of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Requires a live session (profile, home)
    Protected,
    /// Only makes sense without one (login, register)
    AnonymousOnly,
    /// Reachable either way
    Public,
}

/// Routing decision for one navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
    RedirectToHome,
}

#[derive(Debug, Deserialize)]
struct StoredClaims {
    exp: u64,
}

/// Session gate over a token store
pub struct SessionGate<S> {
    store: S,
}

impl<S: TokenStore> SessionGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying token store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist a freshly issued token
    pub fn save_token(&self, token: &str) {
        self.store.set(TOKEN_STORAGE_KEY, token);
    }

    /// Drop the stored token (logout)
    pub fn clear_token(&self) {
        self.store.remove(TOKEN_STORAGE_KEY);
    }

    /// Whether the stored token still looks live
    ///
    /// Clears the token on the way out when it is expired or unreadable.
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.store.get(TOKEN_STORAGE_KEY) else {
            return false;
        };

        match decode_expiry(&token) {
            Some(exp) if exp > now_secs() => true,
            _ => {
                self.store.remove(TOKEN_STORAGE_KEY);
                false
            }
        }
    }

    /// Decide how a navigation to a route of the given kind should resolve
    pub fn decide(&self, route: RouteKind) -> GateDecision {
        let authenticated = self.is_authenticated();
        match route {
            RouteKind::Protected if !authenticated => GateDecision::RedirectToLogin,
            RouteKind::AnonymousOnly if authenticated => GateDecision::RedirectToHome,
            _ => GateDecision::Allow,
        }
    }
}

/// Read the expiry claim without verifying the signature
fn decode_expiry(token: &str) -> Option<u64> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    decode::<StoredClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .map(|data| data.claims.exp)
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        iat: u64,
        exp: u64,
    }

    fn token_with_exp(exp: u64) -> String {
        let claims = TestClaims {
            sub: "a2c3e763-7ef3-4a37-a0f0-8f24f3a5b2a1".to_string(),
            iat: now_secs(),
            exp,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"some-secret-the-client-never-knows"),
        )
        .unwrap()
    }

    fn gate() -> SessionGate<MemoryTokenStore> {
        SessionGate::new(MemoryTokenStore::default())
    }

    #[test]
    fn test_no_token_is_anonymous() {
        let gate = gate();
        assert!(!gate.is_authenticated());
        assert_eq!(gate.decide(RouteKind::Protected), GateDecision::RedirectToLogin);
        assert_eq!(gate.decide(RouteKind::AnonymousOnly), GateDecision::Allow);
        assert_eq!(gate.decide(RouteKind::Public), GateDecision::Allow);
    }

    #[test]
    fn test_live_token_is_authenticated() {
        let gate = gate();
        gate.save_token(&token_with_exp(now_secs() + 3600));

        assert!(gate.is_authenticated());
        assert_eq!(gate.decide(RouteKind::Protected), GateDecision::Allow);
        assert_eq!(
            gate.decide(RouteKind::AnonymousOnly),
            GateDecision::RedirectToHome
        );
    }

    #[test]
    fn test_expired_token_is_cleared() {
        let gate = gate();
        gate.save_token(&token_with_exp(now_secs() - 60));

        assert!(!gate.is_authenticated());
        // proactively removed from the store
        assert!(gate.store().get(TOKEN_STORAGE_KEY).is_none());
        assert_eq!(gate.decide(RouteKind::Protected), GateDecision::RedirectToLogin);
    }

    #[test]
    fn test_garbage_token_is_cleared() {
        let gate = gate();
        gate.save_token("not-a-jwt-at-all");

        assert!(!gate.is_authenticated());
        assert!(gate.store().get(TOKEN_STORAGE_KEY).is_none());
    }

    #[test]
    fn test_logout_clears_token() {
        let gate = gate();
        gate.save_token(&token_with_exp(now_secs() + 3600));
        gate.clear_token();

        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_gate_never_needs_the_signing_key() {
        // the gate reads expiry from a token signed with a key it does not
        // hold; validity here is advisory, the backend stays authoritative
        let gate = gate();
        gate.save_token(&token_with_exp(now_secs() + 10));
        assert!(gate.is_authenticated());
    }
}
