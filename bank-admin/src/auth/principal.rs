//! Authenticated identity

use serde::{Deserialize, Serialize};
use shared::models::{Action, ActionSet, ResourceType, Role, UserInfo};

use super::AuthError;
use super::permissions;

/// The identity bound to a session.
///
/// The role is a snapshot taken at login; later changes to the stored
/// user take effect on the next login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub employee_id: Option<i64>,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrator
    }

    /// Whether this principal may perform `action` on `resource`
    pub fn can(&self, resource: ResourceType, action: Action) -> bool {
        permissions::allows(self.role, resource, action)
    }

    /// Everything this principal may do on `resource`
    pub fn actions_on(&self, resource: ResourceType) -> ActionSet {
        permissions::allowed_actions(self.role, resource)
    }

    /// Guard for handlers: `principal.require(ResourceType::Client, Action::Read)?`
    pub fn require(&self, resource: ResourceType, action: Action) -> Result<(), AuthError> {
        if self.can(resource, action) {
            Ok(())
        } else {
            crate::security_log!(
                "WARN",
                "permission_denied",
                user_id = self.id,
                username = self.username.as_str(),
                role = self.role.as_str(),
                resource = resource.as_str(),
                action = action.letter().to_string()
            );
            Err(AuthError::PermissionDenied { resource, action })
        }
    }

    pub fn to_user_info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            username: self.username.clone(),
            role: self.role.as_str().to_string(),
            role_display_name: self.role.display_name().to_string(),
            employee_id: self.employee_id,
            last_access: None,
        }
    }
}
