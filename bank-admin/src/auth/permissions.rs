//! Permission Definitions
//!
//! Static role → resource → actions matrix.
//!
//! ## Rules
//! - The matrix is fixed at compile time.
//! - Default deny: any (role, resource) pair absent from the table allows nothing.
//! - Unknown role or resource tokens deny; lookups never fail.

use shared::models::{Action, ActionSet, ResourceType, Role};

type RoleGrants = &'static [(ResourceType, ActionSet)];

/// Capability table
static MATRIX: &[(Role, RoleGrants)] = &[
    (
        Role::Administrator,
        &[
            (ResourceType::Branch, ActionSet::CRUD),
            (ResourceType::Employee, ActionSet::CRUD),
            (ResourceType::Client, ActionSet::CRUD),
            (ResourceType::Account, ActionSet::CRUD),
            (ResourceType::Transaction, ActionSet::CRUD),
            (ResourceType::Loan, ActionSet::CRUD),
            (ResourceType::CreditCard, ActionSet::CRUD),
            (ResourceType::User, ActionSet::CRUD),
        ],
    ),
    (
        Role::Developer,
        &[
            (ResourceType::Account, ActionSet::CRUD),
            (ResourceType::Transaction, ActionSet::CRUD),
            (ResourceType::CreditCard, ActionSet::CRUD),
            (ResourceType::Client, ActionSet::READ),
            (ResourceType::Employee, ActionSet::READ),
        ],
    ),
    (
        Role::Supervisor,
        &[
            (ResourceType::Account, ActionSet::READ),
            (ResourceType::Transaction, ActionSet::READ),
            (ResourceType::Loan, ActionSet::READ),
            (ResourceType::CreditCard, ActionSet::READ),
            (ResourceType::Client, ActionSet::READ),
        ],
    ),
];

/// Actions `role` may perform on `resource` (empty when unlisted)
pub fn allowed_actions(role: Role, resource: ResourceType) -> ActionSet {
    MATRIX
        .iter()
        .find(|(r, _)| *r == role)
        .and_then(|(_, grants)| grants.iter().find(|(res, _)| *res == resource))
        .map(|(_, actions)| *actions)
        .unwrap_or(ActionSet::NONE)
}

/// Typed permission check
pub fn allows(role: Role, resource: ResourceType, action: Action) -> bool {
    allowed_actions(role, resource).contains(action)
}

/// Permission check over raw tokens, as stored in sessions and the user table.
///
/// Unknown role or resource → `false`.
pub fn is_allowed(role: &str, resource: &str, action: Action) -> bool {
    match (Role::parse(role), ResourceType::parse(resource)) {
        (Some(role), Some(resource)) => allows(role, resource, action),
        _ => false,
    }
}

/// Resources the role may read, in menu order
pub fn readable_resources(role: Role) -> Vec<ResourceType> {
    ResourceType::ALL
        .into_iter()
        .filter(|res| allows(role, *res, Action::Read))
        .collect()
}

/// Display name for a role token; falls back to the raw token when unknown
pub fn role_display_name(raw: &str) -> String {
    Role::parse(raw)
        .map(|role| role.display_name().to_string())
        .unwrap_or_else(|| raw.to_string())
}
