use axum::http::Method;

use crate::domain::auth::models::Role;
use crate::inbound::http::middleware::AuthContext;

/// What a route requires from the caller.
#[derive(Debug, Clone)]
pub enum Access {
    /// Anyone, including anonymous callers.
    Public,
    /// Any authenticated principal, regardless of role.
    AuthenticatedOnly,
    /// A principal holding at least one of the listed roles.
    AnyRole(&'static [Role]),
}

/// One entry of the static route-policy table.
#[derive(Debug, Clone)]
pub struct RouteRule {
    prefix: &'static str,
    method: Option<Method>,
    access: Access,
}

impl RouteRule {
    pub fn new(prefix: &'static str, method: Option<Method>, access: Access) -> Self {
        Self {
            prefix,
            method,
            access,
        }
    }

    fn matches(&self, path: &str, method: &Method) -> bool {
        if let Some(required) = &self.method {
            if required != method {
                return false;
            }
        }
        if self.prefix == "/" {
            return true;
        }
        // Prefix match on whole path segments: "/users" covers "/users"
        // and "/users/42" but not "/users2".
        path.strip_prefix(self.prefix)
            .map_or(false, |rest| rest.is_empty() || rest.starts_with('/'))
    }
}

/// Outcome of an authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The route requires a principal and none is present.
    Unauthenticated,
    /// A principal is present but holds none of the required roles.
    Forbidden,
}

/// Immutable route-policy table, built once at startup.
///
/// Rules are ordered by specificity at construction: longer path prefixes
/// win over shorter ones, and at equal prefix length an explicit-method
/// rule wins over a wildcard. `decide` takes the first match; a path no
/// rule covers requires authentication.
pub struct RoutePolicy {
    rules: Vec<RouteRule>,
}

impl RoutePolicy {
    pub fn new(mut rules: Vec<RouteRule>) -> Self {
        rules.sort_by(|a, b| {
            b.prefix
                .len()
                .cmp(&a.prefix.len())
                .then(b.method.is_some().cmp(&a.method.is_some()))
        });
        Self { rules }
    }

    /// The catalog service's table, mirroring which surfaces each role may
    /// touch: the auth endpoints are public, the plafond catalog is
    /// readable by any authenticated user and writable by back office,
    /// user administration is back office only, and the branch directory
    /// is readable by branch managers as well.
    pub fn catalog_defaults() -> Self {
        use Role::*;

        Self::new(vec![
            RouteRule::new("/auth", None, Access::Public),
            RouteRule::new("/plafonds", Some(Method::GET), Access::AuthenticatedOnly),
            RouteRule::new("/plafonds", Some(Method::POST), Access::AnyRole(&[BackOffice])),
            RouteRule::new("/plafonds", Some(Method::PUT), Access::AnyRole(&[BackOffice])),
            RouteRule::new(
                "/plafonds",
                Some(Method::DELETE),
                Access::AnyRole(&[BackOffice]),
            ),
            RouteRule::new("/users", None, Access::AnyRole(&[BackOffice])),
            RouteRule::new(
                "/branches",
                Some(Method::GET),
                Access::AnyRole(&[BranchManager, BackOffice]),
            ),
            RouteRule::new("/branches", None, Access::AnyRole(&[BackOffice])),
        ])
    }

    /// Decide whether the caller may reach `path` with `method`.
    ///
    /// Pure and deterministic: same table, same inputs, same decision,
    /// independent of request ordering.
    pub fn decide(&self, path: &str, method: &Method, context: &AuthContext) -> Decision {
        let access = self
            .rules
            .iter()
            .find(|rule| rule.matches(path, method))
            .map(|rule| &rule.access)
            .unwrap_or(&Access::AuthenticatedOnly);

        match (access, context) {
            (Access::Public, _) => Decision::Allow,
            (Access::AuthenticatedOnly, AuthContext::Authenticated(_)) => Decision::Allow,
            (Access::AuthenticatedOnly, _) => Decision::Deny(DenyReason::Unauthenticated),
            (Access::AnyRole(required), AuthContext::Authenticated(user)) => {
                if required.iter().any(|role| user.roles.contains(role)) {
                    Decision::Allow
                } else {
                    Decision::Deny(DenyReason::Forbidden)
                }
            }
            (Access::AnyRole(_), _) => Decision::Deny(DenyReason::Unauthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::auth::models::UserId;
    use crate::inbound::http::middleware::CurrentUser;

    fn authenticated(roles: &[Role]) -> AuthContext {
        AuthContext::Authenticated(CurrentUser {
            id: UserId::new(),
            username: "tester".to_string(),
            roles: HashSet::from_iter(roles.iter().copied()),
        })
    }

    fn policy() -> RoutePolicy {
        RoutePolicy::catalog_defaults()
    }

    #[test]
    fn test_auth_endpoints_are_public() {
        let policy = policy();

        assert_eq!(
            policy.decide("/auth/login", &Method::POST, &AuthContext::NoCredential),
            Decision::Allow
        );
        // A malformed bearer token does not break public endpoints
        assert_eq!(
            policy.decide(
                "/auth/forgot-password",
                &Method::POST,
                &AuthContext::InvalidCredential
            ),
            Decision::Allow
        );
    }

    #[test]
    fn test_plafond_reads_require_authentication_only() {
        let policy = policy();

        assert_eq!(
            policy.decide("/plafonds", &Method::GET, &AuthContext::NoCredential),
            Decision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(
            policy.decide("/plafonds", &Method::GET, &authenticated(&[Role::Customer])),
            Decision::Allow
        );
    }

    #[test]
    fn test_plafond_writes_require_back_office() {
        let policy = policy();

        assert_eq!(
            policy.decide("/plafonds", &Method::POST, &authenticated(&[Role::Customer])),
            Decision::Deny(DenyReason::Forbidden)
        );
        assert_eq!(
            policy.decide(
                "/plafonds",
                &Method::POST,
                &authenticated(&[Role::Customer, Role::BackOffice])
            ),
            Decision::Allow
        );
        assert_eq!(
            policy.decide(
                "/plafonds/42",
                &Method::DELETE,
                &authenticated(&[Role::BackOffice])
            ),
            Decision::Allow
        );
    }

    #[test]
    fn test_invalid_credential_is_treated_as_anonymous() {
        let policy = policy();

        assert_eq!(
            policy.decide("/plafonds", &Method::POST, &AuthContext::InvalidCredential),
            Decision::Deny(DenyReason::Unauthenticated)
        );
    }

    #[test]
    fn test_branch_reads_allow_branch_managers_but_writes_do_not() {
        let policy = policy();

        assert_eq!(
            policy.decide(
                "/branches",
                &Method::GET,
                &authenticated(&[Role::BranchManager])
            ),
            Decision::Allow
        );
        // The wildcard-method rule is less specific than the GET rule and
        // picks up everything else.
        assert_eq!(
            policy.decide(
                "/branches",
                &Method::POST,
                &authenticated(&[Role::BranchManager])
            ),
            Decision::Deny(DenyReason::Forbidden)
        );
        assert_eq!(
            policy.decide(
                "/branches",
                &Method::POST,
                &authenticated(&[Role::BackOffice])
            ),
            Decision::Allow
        );
    }

    #[test]
    fn test_user_administration_is_back_office_only() {
        let policy = policy();

        assert_eq!(
            policy.decide("/users", &Method::GET, &authenticated(&[Role::Marketing])),
            Decision::Deny(DenyReason::Forbidden)
        );
        assert_eq!(
            policy.decide(
                "/users/42",
                &Method::DELETE,
                &authenticated(&[Role::BackOffice])
            ),
            Decision::Allow
        );
    }

    #[test]
    fn test_unmatched_paths_require_authentication() {
        let policy = policy();

        assert_eq!(
            policy.decide("/reports", &Method::GET, &AuthContext::NoCredential),
            Decision::Deny(DenyReason::Unauthenticated)
        );
        assert_eq!(
            policy.decide("/reports", &Method::GET, &authenticated(&[Role::Customer])),
            Decision::Allow
        );
    }

    #[test]
    fn test_prefix_matches_whole_segments_only() {
        let policy = RoutePolicy::new(vec![RouteRule::new("/users", None, Access::Public)]);

        assert_eq!(
            policy.decide("/users/42", &Method::GET, &AuthContext::NoCredential),
            Decision::Allow
        );
        // "/users2" is not under "/users"
        assert_eq!(
            policy.decide("/users2", &Method::GET, &AuthContext::NoCredential),
            Decision::Deny(DenyReason::Unauthenticated)
        );
    }
}
