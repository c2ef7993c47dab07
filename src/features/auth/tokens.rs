use std::time::Duration;

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Stateless anti-forgery tokens for the admin forms.
///
/// A token is `"<expiry-unix>.<hex hmac>"` where the MAC covers the action
/// name and the expiry timestamp. Tokens are action-scoped: a token issued
/// for `add-point` never verifies for `delete-point`. There is no server-side
/// storage; expiry plus the keyed MAC bound the replay window.
pub struct RequestTokenService {
    key: Vec<u8>,
    ttl: Duration,
}

impl RequestTokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
            ttl,
        }
    }

    /// Issue a token for the given action, valid for the configured TTL.
    pub fn issue(&self, action: &str) -> String {
        let expiry = Utc::now().timestamp() + self.ttl.as_secs() as i64;
        format!("{}.{}", expiry, self.mac_for(action, expiry))
    }

    /// Verify a submitted token against the action it should cover.
    pub fn verify(&self, action: &str, token: &str) -> bool {
        let Some((expiry_part, mac_part)) = token.split_once('.') else {
            return false;
        };
        let Ok(expiry) = expiry_part.parse::<i64>() else {
            return false;
        };
        if expiry < Utc::now().timestamp() {
            return false;
        }

        self.mac_for(action, expiry) == mac_part
    }

    fn mac_for(&self, action: &str, expiry: i64) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length");
        mac.update(action.as_bytes());
        mac.update(b"|");
        mac.update(expiry.to_string().as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}
