//! Landing page: menu for the caller's role plus headline counters

use axum::{Json, Router, extract::State, routing::get};
use shared::models::{Dashboard, MenuEntry};

use crate::auth::{Principal, readable_resources};
use crate::core::ServerState;
use crate::utils::ApiResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/dashboard", get(dashboard))
}

/// Resources the role may read, in menu order, each with everything the
/// role may do there
pub fn menu_for(principal: &Principal) -> Vec<MenuEntry> {
    readable_resources(principal.role)
        .into_iter()
        .map(|resource| MenuEntry {
            resource,
            actions: principal.actions_on(resource),
        })
        .collect()
}

/// GET /api/dashboard
async fn dashboard(State(state): State<ServerState>, principal: Principal) -> ApiResult<Dashboard> {
    let stats = state.stats.dashboard_stats().await?;
    Ok(Json(Dashboard {
        user: principal.to_user_info(),
        menu: menu_for(&principal),
        stats,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ActionSet, ResourceType, Role};

    #[test]
    fn test_developer_menu() {
        let principal = Principal {
            id: 1,
            username: "dev".into(),
            role: Role::Developer,
            employee_id: None,
        };
        let menu = menu_for(&principal);
        let resources: Vec<_> = menu.iter().map(|m| m.resource).collect();
        assert_eq!(
            resources,
            [
                ResourceType::Employee,
                ResourceType::Client,
                ResourceType::Account,
                ResourceType::Transaction,
                ResourceType::CreditCard,
            ]
        );
        assert_eq!(menu[0].actions, ActionSet::READ);
        assert_eq!(menu[2].actions, ActionSet::CRUD);
    }
}
