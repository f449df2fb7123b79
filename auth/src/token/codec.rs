use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Signs and verifies compact bearer tokens (HS256 JWS).
///
/// The signing secret and token lifetime are fixed at construction and never
/// mutated; validity is a pure function of the token bytes, the secret, and
/// the instant the caller passes in. No server-side record of issued tokens
/// is kept.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenCodec {
    /// Create a codec from a signing secret and a token lifetime.
    ///
    /// The secret should be at least 256 bits for HS256 and come from
    /// configuration, never from source.
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime,
        }
    }

    /// Configured token lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Sign a token for `subject`, valid from `now` until `now + lifetime`.
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(subject, now, self.lifetime);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify signature, structure, and expiry; return the claims.
    ///
    /// Expiry is checked against the caller-supplied `now` rather than the
    /// wall clock, with no leeway: a token is rejected from the exact
    /// instant `now >= exp`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        if data.claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }

    /// Parse the subject claim without verifying the signature or expiry.
    ///
    /// Inspection only: never use the result for an authorization decision.
    /// The authentication gate always runs [`verify`](Self::verify) first.
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_of_at_least_32_bytes!";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, Duration::hours(24))
    }

    fn at(timestamp: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(timestamp, 0).unwrap()
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let codec = codec();
        let now = at(1_700_000_000);

        let token = codec.issue("alice", now).expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let claims = codec.verify(&token, now).expect("Failed to verify token");
        assert_eq!(claims.subject(), "alice");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 24 * 60 * 60);
    }

    #[test]
    fn test_extract_subject_matches_issued_subject() {
        let codec = codec();
        let token = codec.issue("alice", at(1_700_000_000)).unwrap();

        assert_eq!(codec.extract_subject(&token).unwrap(), "alice");
    }

    #[test]
    fn test_tampered_signature_fails_within_validity_window() {
        let codec = codec();
        let now = at(1_700_000_000);
        let token = codec.issue("alice", now).unwrap();

        // Flip the last signature character to a different base64url symbol.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(codec.verify(&tampered, now).is_err());
    }

    #[test]
    fn test_correct_signature_fails_at_expiry() {
        let codec = TokenCodec::new(SECRET, Duration::seconds(60));
        let issued = at(1_700_000_000);
        let token = codec.issue("alice", issued).unwrap();

        assert!(codec.verify(&token, at(1_700_000_059)).is_ok());
        assert_eq!(
            codec.verify(&token, at(1_700_000_060)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            codec.verify(&token, at(1_700_000_120)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret_fails() {
        let codec = codec();
        let other = TokenCodec::new(b"another_secret_key_of_32_plus_bytes!!", Duration::hours(24));
        let now = at(1_700_000_000);

        let token = codec.issue("alice", now).unwrap();
        assert_eq!(other.verify(&token, now), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let codec = codec();
        let now = at(1_700_000_000);

        assert!(matches!(
            codec.verify("not.a.token", now),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(
            codec.extract_subject("garbage"),
            Err(TokenError::Malformed(_))
        ));
    }
}
