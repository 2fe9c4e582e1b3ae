//! Branch API Handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Action, Branch, BranchCreate, BranchQuery, BranchUpdate, Created, ResourceType};

use crate::auth::Principal;
use crate::core::ServerState;
use crate::db::{BranchFields, constraint};
use crate::utils::validation::{MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, required_text};
use crate::utils::{ApiResult, AppJson, AppPath, AppQuery, ServiceError, delete_blocked};

const RESOURCE: ResourceType = ResourceType::Branch;

fn validate(payload: BranchCreate) -> Result<BranchFields, AppError> {
    Ok(BranchFields {
        name: required_text(&payload.name, "name", MAX_NAME_LEN)?,
        address: required_text(&payload.address, "address", MAX_ADDRESS_LEN)?,
        phone: required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?,
        opened_on: payload.opened_on.unwrap_or_else(|| Utc::now().date_naive()),
    })
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::BranchNotFound).with_detail("id", id)
}

/// GET /api/branches
pub async fn list(
    State(state): State<ServerState>,
    principal: Principal,
    AppQuery(query): AppQuery<BranchQuery>,
) -> ApiResult<Vec<Branch>> {
    principal.require(RESOURCE, Action::Read)?;
    Ok(Json(state.branches.list(&query).await?))
}

/// GET /api/branches/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Branch> {
    principal.require(RESOURCE, Action::Read)?;
    let branch = state.branches.find(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(branch))
}

/// POST /api/branches
pub async fn create(
    State(state): State<ServerState>,
    principal: Principal,
    AppJson(payload): AppJson<BranchCreate>,
) -> Result<(StatusCode, Json<Created>), ServiceError> {
    principal.require(RESOURCE, Action::Create)?;
    let id = state.branches.create(validate(payload)?).await?;
    tracing::info!(branch_id = id, by = principal.id, "Branch created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// PUT /api/branches/{id}
pub async fn update(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<BranchUpdate>,
) -> ApiResult<Branch> {
    principal.require(RESOURCE, Action::Update)?;
    if !state.branches.update(id, validate(payload)?).await? {
        return Err(not_found(id).into());
    }
    let branch = state.branches.find(id).await?.ok_or_else(|| not_found(id))?;
    tracing::info!(branch_id = id, by = principal.id, "Branch updated");
    Ok(Json(branch))
}

/// DELETE /api/branches/{id}
///
/// Refused while employees are assigned to the branch. Accounts and loans
/// opened there block it too.
pub async fn delete(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    principal.require(RESOURCE, Action::Delete)?;

    let employees = state.branches.employee_count(id).await?;
    if employees > 0 {
        return Err(AppError::new(ErrorCode::BranchHasEmployees)
            .with_detail("employees", employees)
            .into());
    }
    let deleted = state
        .branches
        .delete(id)
        .await
        .map_err(delete_blocked(constraint::EMPLOYEE_BRANCH, ErrorCode::BranchHasEmployees))?;
    if !deleted {
        return Err(not_found(id).into());
    }

    tracing::info!(branch_id = id, by = principal.id, "Branch deleted");
    Ok(Json(ApiResponse::ok()))
}
