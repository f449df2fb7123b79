//! Credential and bearer-token primitives for the catalog service.
//!
//! Provides the stateless building blocks the HTTP service composes:
//! - Password hashing and verification (Argon2id, PHC strings)
//! - Bearer-token issuance and verification (HS256, compact JWS)
//! - An authenticator coordinating the two for login flows
//!
//! Everything here is a pure function of its inputs plus immutable state
//! injected at construction (signing secret, token lifetime). Time-sensitive
//! operations take the current instant as a parameter instead of reading the
//! clock, so callers decide what "now" means and tests stay deterministic.
//!
//! # Examples
//!
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//! use chrono::Utc;
//!
//! let authenticator = Authenticator::new(b"a_secret_key_of_at_least_32_bytes!!", Duration::hours(24));
//!
//! let hash = authenticator.hash_password("secret").unwrap();
//! let issued = authenticator
//!     .authenticate("secret", &hash, "alice", Utc::now())
//!     .unwrap();
//!
//! let claims = authenticator
//!     .codec()
//!     .verify(&issued.token, Utc::now())
//!     .unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
