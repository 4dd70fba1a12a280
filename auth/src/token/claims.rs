use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Registered claims carried by an access token (RFC 7519).
///
/// The token asserts identity only: `sub` is the user ID of the account the
/// credentials were verified against at issuance time. It carries no
/// authorization beyond that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessTokenClaims {
    /// Issuer
    pub iss: String,

    /// Subject (user ID as canonical UUID string)
    #[serde(default)]
    pub sub: String,

    /// Audience
    pub aud: Vec<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl AccessTokenClaims {
    /// Build claims for a subject, anchored at the current time.
    ///
    /// Sets `exp = now + ttl_secs`, `nbf = iat = now`.
    pub fn new(
        issuer: String,
        subject: String,
        audience: Vec<String>,
        jti: String,
        ttl_secs: i64,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::seconds(ttl_secs);

        Self {
            iss: issuer,
            sub: subject,
            aud: audience,
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            iat: now.timestamp(),
            jti,
        }
    }

    /// Check whether the token is expired at the given Unix timestamp.
    pub fn is_expired(&self, at: i64) -> bool {
        self.exp < at
    }

    /// Check whether the token is not yet valid at the given Unix timestamp.
    pub fn is_not_yet_valid(&self, at: i64) -> bool {
        at < self.nbf
    }
}
