//! Scope matching and template resolution
//!
//! A scope is a colon-separated string naming the resource(s) an action
//! applies to, e.g. `users:42` or the wildcard pattern `users:*`. This
//! module decides whether a granted scope covers a requested concrete
//! scope, and expands scope templates (`reports:{{reportId}}`) into
//! concrete scopes before matching.
//!
//! # Examples
//!
//! ```
//! use cretoai_rbac::scope;
//! use cretoai_rbac::ScopeParams;
//!
//! assert!(scope::matches("users:*", "users:42").unwrap());
//! assert!(!scope::matches("users:*", "teams:42").unwrap());
//!
//! let params = ScopeParams::new(3);
//! let resolved = scope::resolve_template("orgs:{{orgId}}", &params).unwrap();
//! assert_eq!(resolved, "orgs:3");
//! ```

mod matcher;
mod resolver;


pub use matcher::matches;
pub use resolver::{resolve_template, ORG_ID_PARAM};
