use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::AccessTokenClaims;
use super::errors::TokenError;

/// Token issuance settings, established once at startup.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric signing key. Should be at least 256 bits for HS256.
    pub secret: String,
    /// Value of the `iss` claim
    pub issuer: String,
    /// Value of the `aud` claim
    pub audience: Vec<String>,
    /// Token lifetime in seconds
    pub expiration_secs: i64,
}

/// A freshly signed access token, ready for the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    /// Always `"Bearer"`
    pub token_type: String,
    /// Echo of the configured token lifetime in seconds
    pub expires_in: i64,
}

/// Issues and verifies access tokens with a single symmetric key.
///
/// Signing provides integrity and authenticity, not confidentiality: claims
/// are readable by anyone holding the token. HS256 only; no key rotation.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    audience: Vec<String>,
    expiration_secs: i64,
}

impl TokenIssuer {
    /// Create a token issuer from process-wide configuration.
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            algorithm: Algorithm::HS256,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            expiration_secs: config.expiration_secs,
        }
    }

    /// Sign a token for an already-verified subject.
    ///
    /// Claims: configured issuer and audience, `sub` = the given subject,
    /// `exp` = now + configured TTL, `nbf` = `iat` = now, fresh UUIDv4 `jti`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        let claims = AccessTokenClaims::new(
            self.issuer.clone(),
            subject.to_string(),
            self.audience.clone(),
            Uuid::new_v4().to_string(),
            self.expiration_secs,
        );

        let header = Header::new(self.algorithm);
        let access_token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expiration_secs,
        })
    }

    /// Decode and validate a token: signature, expiration, not-before,
    /// issuer, and audience. No leeway.
    ///
    /// # Errors
    /// * `TokenExpired` - The `exp` claim is in the past
    /// * `DecodingFailed` - Signature invalid, claims mismatched, or malformed
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.set_audience(&self.audience);

        let token_data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::DecodingFailed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TokenConfig {
        TokenConfig {
            secret: "test_secret_key_at_least_32_bytes!".to_string(),
            issuer: "http://localhost:8111/".to_string(),
            audience: vec!["http://localhost:8111/".to_string()],
            expiration_secs: 1200,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(&config());

        let issued = issuer.issue("user123").expect("Failed to issue token");
        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.expires_in, 1200);

        let claims = issuer
            .verify(&issued.access_token)
            .expect("Failed to verify token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.iss, "http://localhost:8111/");
        assert_eq!(claims.aud, vec!["http://localhost:8111/".to_string()]);
        assert_eq!(claims.exp - claims.iat, 1200);
    }

    #[test]
    fn test_jti_is_unique_per_token() {
        let issuer = TokenIssuer::new(&config());

        let first = issuer.issue("user123").unwrap();
        let second = issuer.issue("user123").unwrap();

        let first_claims = issuer.verify(&first.access_token).unwrap();
        let second_claims = issuer.verify(&second.access_token).unwrap();
        assert_ne!(first_claims.jti, second_claims.jti);
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer = TokenIssuer::new(&config());

        let mut other = config();
        other.secret = "another_secret_key_at_least_32_bytes!".to_string();
        let other_issuer = TokenIssuer::new(&other);

        let issued = issuer.issue("user123").unwrap();
        let result = other_issuer.verify(&issued.access_token);
        assert!(matches!(result, Err(TokenError::DecodingFailed(_))));
    }

    #[test]
    fn test_verify_with_wrong_audience() {
        let issuer = TokenIssuer::new(&config());

        let mut other = config();
        other.audience = vec!["http://elsewhere:9999/".to_string()];
        let other_issuer = TokenIssuer::new(&other);

        let issued = issuer.issue("user123").unwrap();
        assert!(other_issuer.verify(&issued.access_token).is_err());
    }

    #[test]
    fn test_verify_garbage_token() {
        let issuer = TokenIssuer::new(&config());
        let result = issuer.verify("invalid.token.here");
        assert!(matches!(result, Err(TokenError::DecodingFailed(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut expired = config();
        expired.expiration_secs = -61;
        let issuer = TokenIssuer::new(&expired);

        let issued = issuer.issue("user123").unwrap();
        let result = issuer.verify(&issued.access_token);
        assert!(matches!(result, Err(TokenError::TokenExpired)));
    }
}
