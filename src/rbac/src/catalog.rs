//! Closed, versioned catalog of action and scope identifiers
//!
//! The vocabulary both policy declarations and stored permissions must
//! use. The catalog is append-only across versions: removing or renaming
//! an action is a breaking change for any stored permission referencing
//! it.

use crate::evaluator::{eval_any, eval_permission, Evaluator};

// Users actions
pub const ACTION_USERS_READ: &str = "users:read";
pub const ACTION_USERS_WRITE: &str = "users:write";
pub const ACTION_USERS_TEAM_READ: &str = "users.teams:read";
pub const ACTION_USERS_AUTH_TOKEN_LIST: &str = "users.authtoken:list";
pub const ACTION_USERS_AUTH_TOKEN_UPDATE: &str = "users.authtoken:update";
pub const ACTION_USERS_PASSWORD_UPDATE: &str = "users.password:update";
pub const ACTION_USERS_DELETE: &str = "users:delete";
pub const ACTION_USERS_CREATE: &str = "users:create";
pub const ACTION_USERS_ENABLE: &str = "users:enable";
pub const ACTION_USERS_DISABLE: &str = "users:disable";
pub const ACTION_USERS_PERMISSIONS_UPDATE: &str = "users.permissions:update";
pub const ACTION_USERS_LOGOUT: &str = "users:logout";
pub const ACTION_USERS_QUOTAS_LIST: &str = "users.quotas:list";
pub const ACTION_USERS_QUOTAS_UPDATE: &str = "users.quotas:update";

// Org actions
pub const ACTION_ORG_USERS_READ: &str = "org.users:read";
pub const ACTION_ORG_USERS_ADD: &str = "org.users:add";
pub const ACTION_ORG_USERS_REMOVE: &str = "org.users:remove";
pub const ACTION_ORG_USERS_ROLE_UPDATE: &str = "org.users.role:update";

// LDAP actions
pub const ACTION_LDAP_USERS_READ: &str = "ldap.user:read";
pub const ACTION_LDAP_USERS_SYNC: &str = "ldap.user:sync";
pub const ACTION_LDAP_STATUS_READ: &str = "ldap.status:read";
pub const ACTION_LDAP_CONFIG_RELOAD: &str = "ldap.config:reload";

// Server actions
pub const ACTION_SERVER_STATS_READ: &str = "server.stats:read";

// Settings actions
pub const ACTION_SETTINGS_READ: &str = "settings:read";

// Datasources actions
pub const ACTION_DATASOURCES_EXPLORE: &str = "datasources:explore";

// Plugin actions
pub const ACTION_PLUGINS_MANAGE: &str = "plugins:manage";

// Licensing actions
pub const ACTION_LICENSING_READ: &str = "licensing:read";
pub const ACTION_LICENSING_UPDATE: &str = "licensing:update";
pub const ACTION_LICENSING_DELETE: &str = "licensing:delete";
pub const ACTION_LICENSING_REPORTS_READ: &str = "licensing.reports:read";

// Global scopes
pub const SCOPE_GLOBAL_USERS_ALL: &str = "global:users:*";

// Users scopes
pub const SCOPE_USERS_ALL: &str = "users:*";

// Settings scopes
pub const SCOPE_SETTINGS_ALL: &str = "settings:*";

/// Access rule gating the licensing and server stats pages.
pub fn licensing_page_reader_access() -> Evaluator {
    eval_any(vec![
        eval_permission(ACTION_LICENSING_READ),
        eval_permission(ACTION_SERVER_STATS_READ),
    ])
}
