//! Scope template resolution
//!
//! Access-rule declarations may require scopes that are only known at
//! request time, e.g. `reports:{{reportId}}`. Templates embed placeholders
//! between `{{` and `}}` and are expanded from the request's
//! [`ScopeParams`] before matching.

use crate::error::{RbacError, Result};
use crate::models::ScopeParams;

/// Placeholder name substituted with the numeric org id
pub const ORG_ID_PARAM: &str = "orgId";

/// Expands every placeholder in a scope template.
///
/// `{{orgId}}` resolves to [`ScopeParams::org_id`]; any other `{{name}}`
/// resolves to the URL parameter of that name. Resolution fails with
/// [`RbacError::ScopeResolution`] if a referenced parameter is absent or a
/// placeholder is left unterminated; a configuration error is never
/// silently passed through as a deny.
///
/// Templates without placeholders resolve to themselves.
pub fn resolve_template(template: &str, params: &ScopeParams) -> Result<String> {
    if !template.contains("{{") {
        return Ok(template.to_string());
    }

    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        resolved.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            return Err(RbacError::ScopeResolution {
                template: template.to_string(),
                param: after.trim().to_string(),
            });
        };

        let name = after[..end].trim();
        if name == ORG_ID_PARAM {
            resolved.push_str(&params.org_id.to_string());
        } else {
            match params.url_params.get(name) {
                Some(value) => resolved.push_str(value),
                None => {
                    return Err(RbacError::ScopeResolution {
                        template: template.to_string(),
                        param: name.to_string(),
                    });
                }
            }
        }

        rest = &after[end + 2..];
    }

    resolved.push_str(rest);
    Ok(resolved)
}
