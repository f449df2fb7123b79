use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a bearer token.
///
/// The subject is the principal's username; issued-at and expiry are Unix
/// timestamps. Nothing else is embedded: roles and the active flag are
/// re-read from the credential store on every request, so a token never
/// outlives a role change by more than its own lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the owning principal's username.
    pub sub: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject issued at `issued_at`, valid for `lifetime`.
    pub fn new(subject: impl Into<String>, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let issued = issued_at.timestamp();
        Self {
            sub: subject.into(),
            iat: issued,
            exp: issued + lifetime.num_seconds(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// A token is expired from the instant `now == exp` onwards.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
