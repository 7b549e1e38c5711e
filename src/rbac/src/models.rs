//! Core RBAC model types
//!
//! Pure data holders with derived read-only accessors. Validation lives in
//! collaborators; the model only guarantees that the derivations
//! ([`Role::global`], [`Role::is_fixed`], [`Role::get_display_name`]) are
//! internally consistent with the stored fields.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::RbacError;

/// Org id of global (built-in) roles
pub const GLOBAL_ORG_ID: i64 = 0;

/// Reserved name prefix marking a role as fixed (system-defined,
/// non-editable). Kept at the storage and serialization boundary for
/// backward compatibility; in memory the role kind is the explicit
/// [`RoleKind`] tag.
pub const FIXED_ROLE_PREFIX: &str = "fixed:";

/// Role kind tag, set at construction from the name prefix convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    /// System-defined, non-editable role (`fixed:` name prefix)
    Fixed,
    /// User-defined role
    Custom,
}

impl RoleKind {
    /// Derives the role kind from a role name.
    pub fn from_name(name: &str) -> Self {
        if name.starts_with(FIXED_ROLE_PREFIX) {
            Self::Fixed
        } else {
            Self::Custom
        }
    }
}

/// The platform's baseline role tiers to which fixed roles are granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuiltinRole {
    /// Read-only tier
    Viewer,
    /// Content-editing tier
    Editor,
    /// Organization administration tier
    Admin,
    /// Server-wide administration tier
    #[serde(rename = "Server Admin")]
    ServerAdmin,
}

impl BuiltinRole {
    /// Returns a stable storage value for this built-in role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::Editor => "Editor",
            Self::Admin => "Admin",
            Self::ServerAdmin => "Server Admin",
        }
    }
}

impl fmt::Display for BuiltinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BuiltinRole {
    type Err = RbacError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Viewer" => Ok(Self::Viewer),
            "Editor" => Ok(Self::Editor),
            "Admin" => Ok(Self::Admin),
            "Server Admin" => Ok(Self::ServerAdmin),
            _ => Err(RbacError::UnknownBuiltinRole(value.to_string())),
        }
    }
}

/// Provides a fallback name for a role that can be displayed in a UI for
/// better readability.
///
/// The `fixed:` prefix is stripped if present, every `:` becomes a single
/// space and surrounding whitespace is trimmed. Deterministic, no I/O.
///
/// # Examples
///
/// ```
/// use cretoai_rbac::fallback_display_name;
///
/// assert_eq!(fallback_display_name("fixed:datasources:name"), "datasources name");
/// assert_eq!(fallback_display_name("datasources:admin"), "datasources admin");
/// ```
pub fn fallback_display_name(name: &str) -> String {
    let stripped = name.strip_prefix(FIXED_ROLE_PREFIX).unwrap_or(name);
    stripped.replace(':', " ").trim().to_string()
}

/// A named, versioned bundle of permissions, either global or
/// organization-scoped.
///
/// Storage-assigned fields (`id`, `version`, timestamps) are mutated only
/// by the persistence collaborator; everything else is immutable once
/// constructed. Constructing through [`Role::new`] keeps `kind` consistent
/// with the name prefix convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Opaque internal key, never exposed externally
    pub id: i64,
    /// Owning org, [`GLOBAL_ORG_ID`] for global roles
    pub org_id: i64,
    /// Monotonic counter incremented on each permission-set change,
    /// used for optimistic concurrency by the storage collaborator
    pub version: i64,
    /// Stable external identifier
    pub uid: String,
    /// Machine identifier (e.g. `fixed:users:reader`)
    pub name: String,
    /// Optional human-readable name; derived from `name` when absent and
    /// the role is fixed
    pub display_name: String,
    /// Free-form description
    pub description: String,
    /// Explicit role-kind tag derived from the name prefix
    pub kind: RoleKind,
    /// Last update timestamp
    pub updated: DateTime<Utc>,
    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Role {
    /// Creates a new role from its machine name.
    ///
    /// The role kind is derived from the `fixed:` prefix convention.
    /// Identity fields are left for the storage collaborator to assign.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let now = Utc::now();

        Self {
            id: 0,
            org_id: GLOBAL_ORG_ID,
            version: 0,
            uid: String::new(),
            kind: RoleKind::from_name(&name),
            name,
            display_name: String::new(),
            description: String::new(),
            updated: now,
            created: now,
        }
    }

    /// Sets the owning org.
    pub fn with_org_id(mut self, org_id: i64) -> Self {
        self.org_id = org_id;
        self
    }

    /// Sets an explicit display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns `true` if this role is global (not organization-scoped).
    pub fn global(&self) -> bool {
        self.org_id == GLOBAL_ORG_ID
    }

    /// Returns `true` if this role is system-defined and non-editable.
    pub fn is_fixed(&self) -> bool {
        self.kind == RoleKind::Fixed
    }

    /// Returns the display name, deriving a fallback for fixed roles with
    /// no explicit display name. Never mutates the stored fields.
    pub fn get_display_name(&self) -> String {
        if self.display_name.is_empty() && self.is_fixed() {
            fallback_display_name(&self.name)
        } else {
            self.display_name.clone()
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RolePayload::from(self).serialize(serializer)
    }
}

/// The same entity enriched with its resolved permissions, used at the
/// system boundary. Convertible back to a bare [`Role`] by dropping the
/// permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDto {
    /// Opaque internal key, never exposed externally
    pub id: i64,
    /// Owning org, [`GLOBAL_ORG_ID`] for global roles
    pub org_id: i64,
    /// Optimistic-concurrency version counter
    pub version: i64,
    /// Stable external identifier
    pub uid: String,
    /// Machine identifier
    pub name: String,
    /// Optional human-readable name
    pub display_name: String,
    /// Free-form description
    pub description: String,
    /// Explicit role-kind tag derived from the name prefix
    pub kind: RoleKind,
    /// Resolved permissions, may be empty
    pub permissions: Vec<Permission>,
    /// Last update timestamp
    pub updated: DateTime<Utc>,
    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl RoleDto {
    /// Creates a new role definition from its machine name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let now = Utc::now();

        Self {
            id: 0,
            org_id: GLOBAL_ORG_ID,
            version: 0,
            uid: String::new(),
            kind: RoleKind::from_name(&name),
            name,
            display_name: String::new(),
            description: String::new(),
            permissions: Vec::new(),
            updated: now,
            created: now,
        }
    }

    /// Sets the owning org.
    pub fn with_org_id(mut self, org_id: i64) -> Self {
        self.org_id = org_id;
        self
    }

    /// Sets an explicit display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a permission to the bundle.
    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    /// Drops the permissions, returning the bare role.
    pub fn role(&self) -> Role {
        Role {
            id: self.id,
            org_id: self.org_id,
            version: self.version,
            uid: self.uid.clone(),
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            kind: self.kind,
            updated: self.updated,
            created: self.created,
        }
    }

    /// Returns `true` if this role is global (not organization-scoped).
    pub fn global(&self) -> bool {
        self.org_id == GLOBAL_ORG_ID
    }

    /// Returns `true` if this role is system-defined and non-editable.
    pub fn is_fixed(&self) -> bool {
        self.kind == RoleKind::Fixed
    }

    /// Returns the display name, deriving a fallback for fixed roles with
    /// no explicit display name. Never mutates the stored fields.
    pub fn get_display_name(&self) -> String {
        if self.display_name.is_empty() && self.is_fixed() {
            fallback_display_name(&self.name)
        } else {
            self.display_name.clone()
        }
    }
}

impl Serialize for RoleDto {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RoleDtoPayload::from(self).serialize(serializer)
    }
}

/// A single `(action, scope)` grant owned by a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Opaque internal key
    #[serde(skip)]
    pub id: i64,
    /// Owning role
    #[serde(skip)]
    pub role_id: i64,
    /// Action identifier (e.g. `users:read`)
    pub action: String,
    /// Scope the action applies to; may be a wildcard pattern, empty for
    /// actions with no scope
    #[serde(default)]
    pub scope: String,
    /// Last update timestamp
    pub updated: DateTime<Utc>,
    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl Permission {
    /// Creates an unscoped permission for an action.
    pub fn new(action: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: 0,
            role_id: 0,
            action: action.into(),
            scope: String::new(),
            updated: now,
            created: now,
        }
    }

    /// Sets the scope the action applies to.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Strips identity and timestamps, keeping only `(action, scope)`.
    ///
    /// Used when permissions cross a licensing or edition boundary and
    /// must be compared structurally rather than by identity.
    pub fn stripped(&self) -> Self {
        Self {
            id: 0,
            role_id: 0,
            action: self.action.clone(),
            scope: self.scope.clone(),
            updated: DateTime::<Utc>::UNIX_EPOCH,
            created: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// Resolution context used to expand scope templates into concrete scopes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeParams {
    /// Org the request is evaluated in
    pub org_id: i64,
    /// Named URL parameters of the request
    pub url_params: HashMap<String, String>,
}

impl ScopeParams {
    /// Creates scope params for an org.
    pub fn new(org_id: i64) -> Self {
        Self {
            org_id,
            url_params: HashMap::new(),
        }
    }

    /// Adds a named URL parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_params.insert(key.into(), value.into());
        self
    }
}

/// Pairs a role definition with the built-in roles it is granted to.
/// Read-only after process initialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleRegistration {
    /// The role definition, permissions included
    pub role: RoleDto,
    /// Built-in roles this definition is granted to
    pub grants: Vec<BuiltinRole>,
}

impl RoleRegistration {
    /// Creates a registration of `role` granted to `grants`.
    pub fn new(role: RoleDto, grants: Vec<BuiltinRole>) -> Self {
        Self { role, grants }
    }

    /// Compares the material content of two registrations: role fields and
    /// permissions as `(action, scope)` pairs, grants as sets. Identity
    /// fields and timestamps do not participate.
    pub fn content_matches(&self, other: &Self) -> bool {
        let stripped = |registration: &Self| -> Vec<Permission> {
            registration
                .role
                .permissions
                .iter()
                .map(Permission::stripped)
                .collect()
        };
        let grant_set = |registration: &Self| -> std::collections::BTreeSet<BuiltinRole> {
            registration.grants.iter().copied().collect()
        };

        self.role.name == other.role.name
            && self.role.org_id == other.role.org_id
            && self.role.display_name == other.role.display_name
            && self.role.description == other.role.description
            && stripped(self) == stripped(other)
            && grant_set(self) == grant_set(other)
    }
}

/// Wire representation of [`Role`] at the system boundary.
///
/// Includes the computed `global` flag and the resolved display name,
/// excludes the internal identity fields (`id`, `org_id`); only `uid` is
/// exposed as the external handle. Producing the payload never mutates the
/// domain entity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePayload<'a> {
    /// Optimistic-concurrency version counter
    pub version: i64,
    /// Stable external identifier
    pub uid: &'a str,
    /// Machine identifier
    pub name: &'a str,
    /// Resolved display name
    pub display_name: String,
    /// Free-form description
    pub description: &'a str,
    /// Computed from the owning org
    pub global: bool,
    /// Last update timestamp
    pub updated: DateTime<Utc>,
    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl<'a> From<&'a Role> for RolePayload<'a> {
    fn from(role: &'a Role) -> Self {
        Self {
            version: role.version,
            uid: &role.uid,
            name: &role.name,
            display_name: role.get_display_name(),
            description: &role.description,
            global: role.global(),
            updated: role.updated,
            created: role.created,
        }
    }
}

/// Wire representation of [`RoleDto`] at the system boundary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDtoPayload<'a> {
    /// Optimistic-concurrency version counter
    pub version: i64,
    /// Stable external identifier
    pub uid: &'a str,
    /// Machine identifier
    pub name: &'a str,
    /// Resolved display name
    pub display_name: String,
    /// Free-form description
    pub description: &'a str,
    /// Computed from the owning org
    pub global: bool,
    /// Resolved permissions, omitted when empty
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub permissions: &'a [Permission],
    /// Last update timestamp
    pub updated: DateTime<Utc>,
    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl<'a> From<&'a RoleDto> for RoleDtoPayload<'a> {
    fn from(role: &'a RoleDto) -> Self {
        Self {
            version: role.version,
            uid: &role.uid,
            name: &role.name,
            display_name: role.get_display_name(),
            description: &role.description,
            global: role.global(),
            permissions: &role.permissions,
            updated: role.updated,
            created: role.created,
        }
    }
}
