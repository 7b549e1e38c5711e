//! End-to-end evaluation tests
//!
//! Exercise the full decision path: static access-rule declaration,
//! scope template resolution and wildcard matching against a principal's
//! resolved permission set.

use std::collections::BTreeSet;

use cretoai_rbac::catalog::{
    licensing_page_reader_access, ACTION_LICENSING_READ, ACTION_ORG_USERS_READ,
    ACTION_SERVER_STATS_READ, ACTION_USERS_READ, SCOPE_GLOBAL_USERS_ALL, SCOPE_USERS_ALL,
};
use cretoai_rbac::{
    eval_all, eval_any, eval_permission, eval_permission_scoped, Permission, RbacError,
    ScopeParams,
};

#[test]
fn test_licensing_page_access_end_to_end() {
    let rule = eval_any(vec![
        eval_permission(ACTION_LICENSING_READ),
        eval_permission(ACTION_SERVER_STATS_READ),
    ]);
    let params = ScopeParams::default();

    let granted = vec![Permission::new(ACTION_SERVER_STATS_READ)];
    assert!(rule.evaluate(&granted, &params).unwrap().allowed);

    // Removing the permission flips the decision
    assert!(!rule.evaluate(&[], &params).unwrap().allowed);
}

#[test]
fn test_shared_catalog_rule_matches_inline_declaration() {
    let granted = vec![Permission::new(ACTION_LICENSING_READ)];
    let params = ScopeParams::default();

    let from_catalog = licensing_page_reader_access()
        .evaluate(&granted, &params)
        .unwrap();
    assert!(from_catalog.allowed);
}

#[test]
fn test_wildcard_grant_covers_global_scope() {
    let rule = eval_permission_scoped(ACTION_USERS_READ, [SCOPE_GLOBAL_USERS_ALL]);
    let granted = vec![Permission::new(ACTION_USERS_READ).with_scope("global:users:*")];
    let params = ScopeParams::default();

    let decision = rule.evaluate(&granted, &params).unwrap();
    assert!(decision.allowed);
    assert_eq!(
        decision.matched_scopes,
        BTreeSet::from(["global:users:*".to_string()])
    );
}

#[test]
fn test_request_scoped_rule_with_url_parameters() {
    // Rule declared once at startup, evaluated per request with the
    // request's own scope params.
    let rule = eval_all(vec![
        eval_permission_scoped(ACTION_USERS_READ, ["users:{{userId}}"]),
        eval_permission(ACTION_ORG_USERS_READ),
    ]);

    let granted = vec![
        Permission::new(ACTION_USERS_READ).with_scope(SCOPE_USERS_ALL),
        Permission::new(ACTION_ORG_USERS_READ),
    ];

    let alice = ScopeParams::new(1).with_param("userId", "42");
    let decision = rule.evaluate(&granted, &alice).unwrap();
    assert!(decision.allowed);
    assert_eq!(
        decision.matched_scopes,
        BTreeSet::from([SCOPE_USERS_ALL.to_string()])
    );

    // Same rule, different request, no rebuild of the tree
    let bob = ScopeParams::new(1).with_param("userId", "7");
    assert!(rule.evaluate(&granted, &bob).unwrap().allowed);

    // A request missing the parameter is a wiring error, not a deny
    let broken = ScopeParams::new(1);
    assert!(matches!(
        rule.evaluate(&granted, &broken),
        Err(RbacError::ScopeResolution { .. })
    ));
}

#[test]
fn test_repeated_evaluation_is_byte_identical() {
    let rule = eval_any(vec![
        eval_permission_scoped(ACTION_USERS_READ, [SCOPE_USERS_ALL]),
        eval_permission(ACTION_SERVER_STATS_READ),
    ]);
    let granted = vec![
        Permission::new(ACTION_USERS_READ).with_scope("users:*"),
        Permission::new(ACTION_USERS_READ).with_scope("users:42"),
    ];
    let params = ScopeParams::new(4);

    let first = rule.evaluate(&granted, &params).unwrap();
    let second = rule.evaluate(&granted, &params).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_rule_declarations_roundtrip_as_json() {
    // Access rules are static data; collaborators ship them as JSON.
    let declaration = serde_json::json!({
        "kind": "any",
        "children": [
            { "kind": "permission", "action": "licensing:read" },
            { "kind": "permission", "action": "users:read", "scopes": ["users:*"] },
        ],
    });

    let rule: cretoai_rbac::Evaluator = serde_json::from_value(declaration).unwrap();
    let granted = vec![Permission::new(ACTION_USERS_READ).with_scope("users:*")];
    assert!(rule.evaluate(&granted, &ScopeParams::default()).unwrap().allowed);
}
