use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;

use crate::models::user::User;

/// Produces the token handed back by a successful login.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User) -> String;
}

/// Unsigned `base64url("<user id>:<issued at millis>")`.
///
/// This is an identifier, not a credential: anyone can forge one and nothing
/// on the server checks it. Replace with a signed, expiring token before any
/// route starts trusting the bearer header.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoTokenIssuer;

impl DemoTokenIssuer {
    pub fn encode(user_id: &str, issued_at_millis: i64) -> String {
        URL_SAFE_NO_PAD.encode(format!("{}:{}", user_id, issued_at_millis))
    }

    /// Splits a demo token back into user id and issue time.
    pub fn decode(token: &str) -> Option<(String, i64)> {
        let raw = URL_SAFE_NO_PAD.decode(token).ok()?;
        let text = String::from_utf8(raw).ok()?;
        let (user_id, millis) = text.rsplit_once(':')?;
        Some((user_id.to_string(), millis.parse().ok()?))
    }
}

impl TokenIssuer for DemoTokenIssuer {
    fn issue(&self, user: &User) -> String {
        Self::encode(&user.id.to_hex(), Utc::now().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_embeds_user_id() {
        let user = User::new("a@b.com", "hash");
        let before = Utc::now().timestamp_millis();
        let token = DemoTokenIssuer.issue(&user);

        assert!(!token.is_empty());
        assert!(!token.contains('='));

        let (user_id, issued_at) = DemoTokenIssuer::decode(&token).unwrap();
        assert_eq!(user_id, user.id.to_hex());
        assert!(issued_at >= before);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(DemoTokenIssuer::decode("!!!").is_none());
        assert!(DemoTokenIssuer::decode(&URL_SAFE_NO_PAD.encode("no-separator")).is_none());
    }
}
