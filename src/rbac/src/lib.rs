//! # CretoAI RBAC Engine
//!
//! In-process role-based access control decision core.
//!
//! Given a principal's granted permissions and a declarative access rule,
//! this crate decides whether the principal may perform an action on a
//! scope. The decision path is a pure, synchronous computation: access
//! rules are immutable [`Evaluator`] expression trees built once from
//! static declarations and evaluated repeatedly against different
//! principals' permission sets.
//!
//! ## Features
//!
//! - **Expression-tree evaluation** with `all-of` / `any-of` composition
//!   and short-circuiting
//! - **Wildcard scope matching** with trailing-`*` prefix semantics
//! - **Scope templates** expanded from request parameters (`{{orgId}}`,
//!   named URL parameters)
//! - **Role model** with fixed/custom role kinds, display-name derivation
//!   and an explicit serialization boundary
//! - **Write-once role registry** consumed by seeding collaborators
//!
//! ## Example
//!
//! ```rust
//! use cretoai_rbac::{eval_any, eval_permission, Permission, ScopeParams};
//! use cretoai_rbac::catalog::{ACTION_LICENSING_READ, ACTION_SERVER_STATS_READ};
//!
//! # fn main() -> cretoai_rbac::Result<()> {
//! let rule = eval_any(vec![
//!     eval_permission(ACTION_LICENSING_READ),
//!     eval_permission(ACTION_SERVER_STATS_READ),
//! ]);
//!
//! let granted = vec![Permission::new(ACTION_SERVER_STATS_READ)];
//! let decision = rule.evaluate(&granted, &ScopeParams::default())?;
//! assert!(decision.allowed);
//! # Ok(())
//! # }
//! ```
//!
//! Persistence of roles and permissions, principal resolution and HTTP
//! wiring are external collaborators. This crate only answers "is this
//! permission set sufficient?".

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod registry;
pub mod scope;

// Re-export commonly used types
pub use error::{RbacError, Result};
pub use evaluator::{eval_all, eval_any, eval_permission, eval_permission_scoped};
pub use evaluator::{Decision, Evaluator};
pub use models::{
    fallback_display_name, BuiltinRole, Permission, Role, RoleDto, RoleKind, RoleRegistration,
    ScopeParams, FIXED_ROLE_PREFIX, GLOBAL_ORG_ID,
};
pub use registry::RoleRegistry;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
