//! Access-rule evaluation
//!
//! An access rule is an immutable boolean expression tree over permission
//! predicates. Trees are built once from static declarations via the
//! [`eval_permission`], [`eval_all`] and [`eval_any`] factories and are
//! safe for concurrent reuse across many evaluations: principal
//! permissions are passed in at evaluation time, never stored in the tree.
//!
//! Evaluation is pure and total for well-formed trees. A malformed scope
//! template or pattern is surfaced as an error, distinct from a denial;
//! identical inputs always yield identical output, which is what a caching
//! collaborator layered above this engine relies on.
//!
//! # Example
//!
//! ```
//! use cretoai_rbac::{eval_any, eval_permission, Permission, ScopeParams};
//!
//! # fn main() -> cretoai_rbac::Result<()> {
//! let rule = eval_any(vec![
//!     eval_permission("licensing:read"),
//!     eval_permission("server.stats:read"),
//! ]);
//!
//! let granted = vec![Permission::new("server.stats:read")];
//! assert!(rule.evaluate(&granted, &ScopeParams::default())?.allowed);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;
use crate::models::{Permission, ScopeParams};
use crate::scope;

/// Immutable boolean expression tree over permission predicates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Evaluator {
    /// Leaf: the principal must hold `action`, with a granted scope
    /// covering at least one of the required scope templates. An empty
    /// template list makes the leaf action-only.
    Permission {
        /// Required action identifier
        action: String,
        /// Alternative required scope templates, resolved at evaluation
        /// time
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        scopes: Vec<String>,
    },

    /// Conjunction: allowed iff every child is allowed. Empty evaluates to
    /// allowed (vacuous truth).
    All {
        /// Child expressions
        children: Vec<Evaluator>,
    },

    /// Disjunction: allowed iff at least one child is allowed. Empty
    /// evaluates to denied.
    Any {
        /// Child expressions
        children: Vec<Evaluator>,
    },
}

/// Outcome of evaluating an access rule against a permission set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Whether the permission set satisfies the rule
    pub allowed: bool,
    /// Granted scopes that satisfied permission leaves, ordered for
    /// deterministic output
    pub matched_scopes: BTreeSet<String>,
}

impl Decision {
    fn denied() -> Self {
        Self::default()
    }
}

/// Builds an action-only permission leaf.
pub fn eval_permission(action: impl Into<String>) -> Evaluator {
    Evaluator::Permission {
        action: action.into(),
        scopes: Vec::new(),
    }
}

/// Builds a permission leaf requiring one of the given scope templates.
pub fn eval_permission_scoped<I, S>(action: impl Into<String>, scopes: I) -> Evaluator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Evaluator::Permission {
        action: action.into(),
        scopes: scopes.into_iter().map(Into::into).collect(),
    }
}

/// Builds a conjunction over child expressions.
pub fn eval_all(children: Vec<Evaluator>) -> Evaluator {
    Evaluator::All { children }
}

/// Builds a disjunction over child expressions.
pub fn eval_any(children: Vec<Evaluator>) -> Evaluator {
    Evaluator::Any { children }
}

impl Evaluator {
    /// Evaluates this rule against a principal's permission set.
    ///
    /// Conjunctions short-circuit on the first denied child and
    /// disjunctions on the first allowed child; evaluation has no side
    /// effects, so the order only affects latency, never the result.
    pub fn evaluate(&self, permissions: &[Permission], params: &ScopeParams) -> Result<Decision> {
        match self {
            Self::Permission { action, scopes } => {
                let decision = evaluate_permission(action, scopes, permissions, params)?;
                trace!(%action, allowed = decision.allowed, "evaluated permission leaf");
                Ok(decision)
            }

            Self::All { children } => {
                let mut matched_scopes = BTreeSet::new();
                for child in children {
                    let decision = child.evaluate(permissions, params)?;
                    if !decision.allowed {
                        return Ok(Decision::denied());
                    }
                    matched_scopes.extend(decision.matched_scopes);
                }
                Ok(Decision {
                    allowed: true,
                    matched_scopes,
                })
            }

            Self::Any { children } => {
                for child in children {
                    let decision = child.evaluate(permissions, params)?;
                    if decision.allowed {
                        return Ok(decision);
                    }
                }
                Ok(Decision::denied())
            }
        }
    }
}

fn evaluate_permission(
    action: &str,
    scopes: &[String],
    permissions: &[Permission],
    params: &ScopeParams,
) -> Result<Decision> {
    if scopes.is_empty() {
        let allowed = permissions.iter().any(|p| p.action == action);
        return Ok(Decision {
            allowed,
            matched_scopes: BTreeSet::new(),
        });
    }

    let mut matched_scopes = BTreeSet::new();
    for template in scopes {
        let requested = scope::resolve_template(template, params)?;
        for permission in permissions.iter().filter(|p| p.action == action) {
            if scope::matches(&permission.scope, &requested)? {
                matched_scopes.insert(permission.scope.clone());
            }
        }
    }

    Ok(Decision {
        allowed: !matched_scopes.is_empty(),
        matched_scopes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RbacError;

    fn granted(pairs: &[(&str, &str)]) -> Vec<Permission> {
        pairs
            .iter()
            .map(|(action, scope)| Permission::new(*action).with_scope(*scope))
            .collect()
    }

    #[test]
    fn test_empty_all_is_vacuously_allowed() {
        let decision = eval_all(vec![])
            .evaluate(&[], &ScopeParams::default())
            .unwrap();
        assert!(decision.allowed);
        assert!(decision.matched_scopes.is_empty());
    }

    #[test]
    fn test_empty_any_is_denied() {
        let decision = eval_any(vec![])
            .evaluate(&[], &ScopeParams::default())
            .unwrap();
        assert!(!decision.allowed);
    }

    #[test]
    fn test_action_only_leaf() {
        let rule = eval_permission("server.stats:read");
        let permissions = vec![Permission::new("server.stats:read")];

        assert!(rule.evaluate(&permissions, &ScopeParams::default()).unwrap().allowed);
        assert!(!rule.evaluate(&[], &ScopeParams::default()).unwrap().allowed);
    }

    #[test]
    fn test_scoped_leaf_matches_wildcard_grant() {
        let rule = eval_permission_scoped("users:read", ["users:42"]);
        let permissions = granted(&[("users:read", "users:*")]);

        let decision = rule.evaluate(&permissions, &ScopeParams::default()).unwrap();
        assert!(decision.allowed);
        assert_eq!(
            decision.matched_scopes,
            BTreeSet::from(["users:*".to_string()])
        );
    }

    #[test]
    fn test_scoped_leaf_requires_matching_action() {
        let rule = eval_permission_scoped("users:read", ["users:42"]);
        let permissions = granted(&[("teams:read", "users:*")]);

        assert!(!rule.evaluate(&permissions, &ScopeParams::default()).unwrap().allowed);
    }

    #[test]
    fn test_leaf_collects_all_satisfying_grants() {
        let rule = eval_permission_scoped("users:read", ["users:42"]);
        let permissions = granted(&[
            ("users:read", "users:*"),
            ("users:read", "users:42"),
            ("users:read", "teams:1"),
        ]);

        let decision = rule.evaluate(&permissions, &ScopeParams::default()).unwrap();
        assert_eq!(
            decision.matched_scopes,
            BTreeSet::from(["users:*".to_string(), "users:42".to_string()])
        );
    }

    #[test]
    fn test_all_requires_every_child() {
        let rule = eval_all(vec![
            eval_permission("users:read"),
            eval_permission("users:write"),
        ]);

        let read_only = vec![Permission::new("users:read")];
        assert!(!rule.evaluate(&read_only, &ScopeParams::default()).unwrap().allowed);

        let both = vec![
            Permission::new("users:read"),
            Permission::new("users:write"),
        ];
        assert!(rule.evaluate(&both, &ScopeParams::default()).unwrap().allowed);
    }

    #[test]
    fn test_any_requires_one_child() {
        let rule = eval_any(vec![
            eval_permission("licensing:read"),
            eval_permission("server.stats:read"),
        ]);

        let stats = vec![Permission::new("server.stats:read")];
        assert!(rule.evaluate(&stats, &ScopeParams::default()).unwrap().allowed);
        assert!(!rule.evaluate(&[], &ScopeParams::default()).unwrap().allowed);
    }

    #[test]
    fn test_any_consistency_with_children() {
        let left = eval_permission("licensing:read");
        let right = eval_permission("server.stats:read");
        let rule = eval_any(vec![left.clone(), right.clone()]);
        let params = ScopeParams::default();

        for permissions in [
            granted(&[]),
            granted(&[("licensing:read", "")]),
            granted(&[("server.stats:read", "")]),
            granted(&[("licensing:read", ""), ("server.stats:read", "")]),
        ] {
            let expected = left.evaluate(&permissions, &params).unwrap().allowed
                || right.evaluate(&permissions, &params).unwrap().allowed;
            assert_eq!(rule.evaluate(&permissions, &params).unwrap().allowed, expected);
        }
    }

    #[test]
    fn test_template_resolution_inside_leaf() {
        let rule = eval_permission_scoped("users:read", ["orgs:{{orgId}}:users:{{userId}}"]);
        let permissions = granted(&[("users:read", "orgs:3:users:*")]);
        let params = ScopeParams::new(3).with_param("userId", "7");

        let decision = rule.evaluate(&permissions, &params).unwrap();
        assert!(decision.allowed);
    }

    #[test]
    fn test_missing_parameter_propagates_not_denies() {
        let rule = eval_permission_scoped("users:read", ["orgs:{{orgId}}:users:{{userId}}"]);
        let permissions = granted(&[("users:read", "orgs:3:users:*")]);

        let result = rule.evaluate(&permissions, &ScopeParams::new(3));
        assert!(matches!(result, Err(RbacError::ScopeResolution { .. })));
    }

    #[test]
    fn test_malformed_grant_pattern_propagates() {
        let rule = eval_permission_scoped("users:read", ["users:42"]);
        let permissions = granted(&[("users:read", "users:*:teams")]);

        let result = rule.evaluate(&permissions, &ScopeParams::default());
        assert!(matches!(result, Err(RbacError::MalformedScopePattern(_))));
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let rule = eval_all(vec![
            eval_permission_scoped("users:read", ["users:42"]),
            eval_any(vec![
                eval_permission("licensing:read"),
                eval_permission("server.stats:read"),
            ]),
        ]);
        let permissions = granted(&[
            ("users:read", "users:*"),
            ("server.stats:read", ""),
        ]);
        let params = ScopeParams::new(1);

        let first = rule.evaluate(&permissions, &params).unwrap();
        let second = rule.evaluate(&permissions, &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_declaration_json_shape() {
        let rule = eval_any(vec![
            eval_permission("licensing:read"),
            eval_permission_scoped("users:read", ["users:*"]),
        ]);

        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["kind"], "any");
        assert_eq!(json["children"][0]["kind"], "permission");
        assert!(json["children"][0].get("scopes").is_none());
        assert_eq!(json["children"][1]["scopes"][0], "users:*");

        let parsed: Evaluator = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, rule);
    }
}
