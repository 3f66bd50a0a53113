//! Route-level access rules and per-resource ownership checks.
//!
//! Authorization is a two-tier decision:
//!
//! 1. A static, ordered rule table mapping (method, path pattern) to an
//!    [`Access`] requirement, evaluated top to bottom with first match wins.
//!    Declaring the table as data keeps precedence auditable and lets it be
//!    tested without any HTTP wiring.
//! 2. Dynamic ownership checks on mutating operations, expressed once through
//!    the [`Owned`] trait instead of per-resource-type conditionals.

use axum::http::Method;

use crate::{
    api::models::users::{CurrentUser, Role},
    errors::Error,
    types::{Operation, Permission, UserId},
};

/// Access requirement attached to a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, including anonymous callers
    Public,
    /// Any authenticated principal
    Authenticated,
    /// A principal holding the given role
    Role(Role),
}

/// One entry in the ordered route rule table.
///
/// `methods = None` matches any method. A pattern ending in `/**` matches the
/// prefix itself and anything below it; other patterns match exactly.
pub struct RouteRule {
    methods: Option<&'static [&'static str]>,
    pattern: &'static str,
    access: Access,
}

const GET: &[&str] = &["GET"];
const WRITE: &[&str] = &["POST", "PUT"];
const DELETE: &[&str] = &["DELETE"];
const MUTATE: &[&str] = &["POST", "PUT", "DELETE"];

/// The route rule table. Order matters: more specific rules are declared
/// before the catch-all, and the first matching entry decides.
///
/// Delete rules for products and orders only require authentication here;
/// the owner-or-admin decision needs the resource and happens in the handler.
const ROUTE_RULES: &[RouteRule] = &[
    RouteRule {
        methods: None,
        pattern: "/auth/**",
        access: Access::Public,
    },
    RouteRule {
        methods: None,
        pattern: "/healthz",
        access: Access::Public,
    },
    RouteRule {
        methods: None,
        pattern: "/docs/**",
        access: Access::Public,
    },
    RouteRule {
        methods: None,
        pattern: "/api-docs/**",
        access: Access::Public,
    },
    RouteRule {
        methods: Some(GET),
        pattern: "/products/**",
        access: Access::Public,
    },
    RouteRule {
        methods: Some(GET),
        pattern: "/categories/**",
        access: Access::Public,
    },
    RouteRule {
        methods: Some(GET),
        pattern: "/orders/**",
        access: Access::Public,
    },
    RouteRule {
        methods: Some(WRITE),
        pattern: "/products/**",
        access: Access::Authenticated,
    },
    RouteRule {
        methods: Some(DELETE),
        pattern: "/products/**",
        access: Access::Authenticated,
    },
    RouteRule {
        methods: Some(MUTATE),
        pattern: "/categories/**",
        access: Access::Role(Role::Admin),
    },
    RouteRule {
        methods: Some(WRITE),
        pattern: "/orders/**",
        access: Access::Authenticated,
    },
    RouteRule {
        methods: Some(DELETE),
        pattern: "/orders/**",
        access: Access::Authenticated,
    },
];

fn pattern_matches(pattern: &str, path: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix("/**") {
        path == prefix || (path.starts_with(prefix) && path.as_bytes().get(prefix.len()) == Some(&b'/'))
    } else {
        path == pattern
    }
}

/// Resolve the access requirement for a request line.
///
/// Anything not covered by an explicit rule requires authentication.
pub fn required_access(method: &Method, path: &str) -> Access {
    for rule in ROUTE_RULES {
        let method_matches = match rule.methods {
            None => true,
            Some(methods) => methods.contains(&method.as_str()),
        };
        if method_matches && pattern_matches(rule.pattern, path) {
            return rule.access;
        }
    }
    Access::Authenticated
}

fn operation_for_method(method: &Method) -> Operation {
    match method.as_str() {
        "POST" => Operation::Create,
        "PUT" | "PATCH" => Operation::Update,
        "DELETE" => Operation::Delete,
        _ => Operation::Read,
    }
}

/// Enforce an access requirement against the (possibly absent) principal.
///
/// No principal yields 401; a principal with an insufficient role yields 403.
pub fn authorize(access: Access, principal: Option<&CurrentUser>, method: &Method, path: &str) -> Result<(), Error> {
    match access {
        Access::Public => Ok(()),
        Access::Authenticated => {
            principal.ok_or(Error::Unauthenticated { message: None })?;
            Ok(())
        }
        Access::Role(role) => {
            let user = principal.ok_or(Error::Unauthenticated { message: None })?;
            if user.roles.contains(&role) {
                Ok(())
            } else {
                Err(Error::InsufficientPermissions {
                    required: Permission::Role(role),
                    action: operation_for_method(method),
                    resource: path.to_string(),
                })
            }
        }
    }
}

/// A resource with an owning-user reference.
///
/// `None` means the resource kind has no owner concept (categories), in which
/// case authorization is role-only and this check should not be reached.
pub trait Owned {
    fn owner_user_id(&self) -> Option<UserId>;
}

/// Grant the operation iff the principal is an admin or owns the resource.
pub fn ensure_owner_or_admin<T: Owned>(
    user: &CurrentUser,
    resource: &T,
    action: Operation,
    description: impl Into<String>,
) -> Result<(), Error> {
    if user.is_admin() || resource.owner_user_id() == Some(user.id) {
        return Ok(());
    }

    Err(Error::InsufficientPermissions {
        required: Permission::Any(vec![Permission::Role(Role::Admin), Permission::Owner]),
        action,
        resource: description.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(roles: Vec<Role>) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            roles,
        }
    }

    struct Widget {
        owner: Option<UserId>,
    }

    impl Owned for Widget {
        fn owner_user_id(&self) -> Option<UserId> {
            self.owner
        }
    }

    #[test]
    fn test_auth_routes_are_public() {
        assert_eq!(required_access(&Method::POST, "/auth/register"), Access::Public);
        assert_eq!(required_access(&Method::POST, "/auth/login"), Access::Public);
    }

    #[test]
    fn test_resource_reads_are_public() {
        assert_eq!(required_access(&Method::GET, "/products"), Access::Public);
        assert_eq!(required_access(&Method::GET, "/products/abc"), Access::Public);
        assert_eq!(required_access(&Method::GET, "/categories/abc"), Access::Public);
        assert_eq!(required_access(&Method::GET, "/orders"), Access::Public);
    }

    #[test]
    fn test_resource_writes_require_authentication() {
        assert_eq!(required_access(&Method::POST, "/products"), Access::Authenticated);
        assert_eq!(required_access(&Method::PUT, "/products/abc"), Access::Authenticated);
        assert_eq!(required_access(&Method::DELETE, "/products/abc"), Access::Authenticated);
        assert_eq!(required_access(&Method::POST, "/orders"), Access::Authenticated);
        assert_eq!(required_access(&Method::DELETE, "/orders/abc"), Access::Authenticated);
    }

    #[test]
    fn test_category_writes_require_admin() {
        assert_eq!(required_access(&Method::POST, "/categories"), Access::Role(Role::Admin));
        assert_eq!(required_access(&Method::PUT, "/categories/abc"), Access::Role(Role::Admin));
        assert_eq!(required_access(&Method::DELETE, "/categories/abc"), Access::Role(Role::Admin));
    }

    #[test]
    fn test_unmatched_routes_default_to_authenticated() {
        assert_eq!(required_access(&Method::GET, "/internal/anything"), Access::Authenticated);
        assert_eq!(required_access(&Method::PATCH, "/products/abc"), Access::Authenticated);
    }

    #[test]
    fn test_prefix_matching_does_not_overreach() {
        // "/productsfoo" must not match "/products/**"
        assert_eq!(required_access(&Method::GET, "/productsfoo"), Access::Authenticated);
    }

    #[test]
    fn test_authorize_public() {
        assert!(authorize(Access::Public, None, &Method::GET, "/products").is_ok());
    }

    #[test]
    fn test_authorize_authenticated() {
        let u = user(vec![Role::User]);
        assert!(authorize(Access::Authenticated, Some(&u), &Method::POST, "/products").is_ok());

        let err = authorize(Access::Authenticated, None, &Method::POST, "/products").unwrap_err();
        assert_eq!(err.status_code().as_u16(), 401);
    }

    #[test]
    fn test_authorize_role() {
        let admin = user(vec![Role::User, Role::Admin]);
        let regular = user(vec![Role::User]);

        assert!(authorize(Access::Role(Role::Admin), Some(&admin), &Method::POST, "/categories").is_ok());

        let err = authorize(Access::Role(Role::Admin), Some(&regular), &Method::POST, "/categories").unwrap_err();
        assert_eq!(err.status_code().as_u16(), 403);

        let err = authorize(Access::Role(Role::Admin), None, &Method::POST, "/categories").unwrap_err();
        assert_eq!(err.status_code().as_u16(), 401);
    }

    #[test]
    fn test_owner_or_admin() {
        let owner = user(vec![Role::User]);
        let admin = user(vec![Role::User, Role::Admin]);
        let stranger = user(vec![Role::User]);

        let widget = Widget { owner: Some(owner.id) };

        assert!(ensure_owner_or_admin(&owner, &widget, Operation::Delete, "widget").is_ok());
        assert!(ensure_owner_or_admin(&admin, &widget, Operation::Delete, "widget").is_ok());

        let err = ensure_owner_or_admin(&stranger, &widget, Operation::Delete, "widget").unwrap_err();
        assert_eq!(err.status_code().as_u16(), 403);
    }

    #[test]
    fn test_ownerless_resource_is_admin_only() {
        let admin = user(vec![Role::Admin]);
        let regular = user(vec![Role::User]);
        let widget = Widget { owner: None };

        assert!(ensure_owner_or_admin(&admin, &widget, Operation::Update, "widget").is_ok());
        assert!(ensure_owner_or_admin(&regular, &widget, Operation::Update, "widget").is_err());
    }
}
