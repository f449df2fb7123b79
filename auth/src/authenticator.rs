use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Coordinates password verification and bearer-token issuance.
///
/// Holds the only two pieces of process-wide authentication state, both
/// immutable after construction: the signing secret (inside the codec) and
/// the token lifetime.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// A freshly signed bearer token plus its validity in seconds, as reported
/// to the client.
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    /// Password did not match the stored hash. Callers collapse this with
    /// unknown-user outcomes before it reaches a client.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl Authenticator {
    pub fn new(secret: &[u8], token_lifetime: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(secret, token_lifetime),
        }
    }

    /// The codec, for request-time verification by the authentication gate.
    pub fn codec(&self) -> &TokenCodec {
        &self.token_codec
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify `password` against `stored_hash` and, on success, issue a
    /// bearer token for `subject` valid from `now`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - password does not match
    /// * `Password` - stored hash is malformed
    /// * `Token` - token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let token = self.token_codec.issue(subject, now)?;

        Ok(IssuedToken {
            token,
            expires_in: self.token_codec.lifetime().num_seconds(),
        })
    }
}
