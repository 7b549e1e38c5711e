//! Role registration registry
//!
//! Process-wide, write-once-then-read-only table associating role
//! definitions with the built-in roles they are granted to. Collaborators
//! register their fixed roles during a single-threaded startup phase; the
//! seeding/storage collaborator queries the registry thereafter to
//! materialize the roles and their built-in assignments.
//!
//! The registry is an explicit object constructed during application
//! bootstrap and handed to every collaborator that needs it; there is no
//! ambient global. Reads are safe from arbitrarily many threads once
//! initialization completes. Registering concurrently with steady-state
//! read traffic is unsupported: registration is a startup-phase
//! precondition, not something the registry guards internally.

use parking_lot::RwLock;
use tracing::debug;

use crate::error::{RbacError, Result};
use crate::models::{BuiltinRole, RoleDto, RoleRegistration};

/// Write-once-then-read-only table of role registrations
#[derive(Debug, Default)]
pub struct RoleRegistry {
    registrations: RwLock<Vec<RoleRegistration>>,
}

impl RoleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a role definition and its built-in role grants.
    ///
    /// Re-registering a role name with identical content is an idempotent
    /// no-op. Registering a role name whose content differs materially
    /// from the existing registration is a
    /// [`RbacError::RegistrationConflict`]; a distinct registration is
    /// never silently dropped. Registrations cannot be removed or mutated
    /// afterwards.
    pub fn register(&self, registration: RoleRegistration) -> Result<()> {
        let mut registrations = self.registrations.write();

        if let Some(existing) = registrations
            .iter()
            .find(|r| r.role.name == registration.role.name)
        {
            if existing.content_matches(&registration) {
                debug!(role = %registration.role.name, "identical re-registration ignored");
                return Ok(());
            }
            return Err(RbacError::RegistrationConflict(
                registration.role.name.clone(),
            ));
        }

        debug!(
            role = %registration.role.name,
            grants = registration.grants.len(),
            "registered role"
        );
        registrations.push(registration);
        Ok(())
    }

    /// Returns all registrations in registration order.
    pub fn registrations(&self) -> Vec<RoleRegistration> {
        self.registrations.read().clone()
    }

    /// Returns the role definitions granted to a built-in role, in
    /// registration order. A built-in role may be granted several
    /// registrations, each contributing its permission bundle.
    pub fn granted_to(&self, builtin: BuiltinRole) -> Vec<RoleDto> {
        self.registrations
            .read()
            .iter()
            .filter(|r| r.grants.contains(&builtin))
            .map(|r| r.role.clone())
            .collect()
    }

    /// Returns the number of registered roles.
    pub fn len(&self) -> usize {
        self.registrations.read().len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.read().is_empty()
    }
}
