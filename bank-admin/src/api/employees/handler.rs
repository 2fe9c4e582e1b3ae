//! Employee API Handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    Action, Created, Employee, EmployeeCreate, EmployeeQuery, EmployeeUpdate, ResourceType,
};

use crate::auth::Principal;
use crate::core::ServerState;
use crate::db::{EmployeeFields, constraint};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, optional_text, required_text,
};
use crate::utils::{ApiResult, AppJson, AppPath, AppQuery, ServiceError, delete_blocked};

const RESOURCE: ResourceType = ResourceType::Employee;

fn validate(payload: EmployeeCreate) -> Result<EmployeeFields, AppError> {
    Ok(EmployeeFields {
        branch_id: payload.branch_id,
        first_name: required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?,
        last_name: required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?,
        position: required_text(&payload.position, "position", MAX_NAME_LEN)?,
        phone: optional_text(payload.phone, "phone", MAX_SHORT_TEXT_LEN)?,
        email: optional_text(payload.email, "email", MAX_EMAIL_LEN)?,
        hired_on: payload.hired_on.unwrap_or_else(|| Utc::now().date_naive()),
    })
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::EmployeeNotFound).with_detail("id", id)
}

/// GET /api/employees
pub async fn list(
    State(state): State<ServerState>,
    principal: Principal,
    AppQuery(query): AppQuery<EmployeeQuery>,
) -> ApiResult<Vec<Employee>> {
    principal.require(RESOURCE, Action::Read)?;
    Ok(Json(state.employees.list(&query).await?))
}

/// GET /api/employees/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Employee> {
    principal.require(RESOURCE, Action::Read)?;
    let employee = state.employees.find(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(employee))
}

/// POST /api/employees
pub async fn create(
    State(state): State<ServerState>,
    principal: Principal,
    AppJson(payload): AppJson<EmployeeCreate>,
) -> Result<(StatusCode, Json<Created>), ServiceError> {
    principal.require(RESOURCE, Action::Create)?;
    let id = state.employees.create(validate(payload)?).await?;
    tracing::info!(employee_id = id, by = principal.id, "Employee created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// PUT /api/employees/{id}
pub async fn update(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<EmployeeUpdate>,
) -> ApiResult<Employee> {
    principal.require(RESOURCE, Action::Update)?;
    if !state.employees.update(id, validate(payload)?).await? {
        return Err(not_found(id).into());
    }
    let employee = state.employees.find(id).await?.ok_or_else(|| not_found(id))?;
    tracing::info!(employee_id = id, by = principal.id, "Employee updated");
    Ok(Json(employee))
}

/// DELETE /api/employees/{id}
///
/// Refused while the employee still manages accounts. Login accounts linked
/// to the employee are kept and unlinked.
pub async fn delete(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    principal.require(RESOURCE, Action::Delete)?;

    let accounts = state.employees.account_count(id).await?;
    if accounts > 0 {
        return Err(AppError::new(ErrorCode::EmployeeHasAccounts)
            .with_detail("accounts", accounts)
            .into());
    }
    let deleted = state
        .employees
        .delete(id)
        .await
        .map_err(delete_blocked(constraint::ACCOUNT_EMPLOYEE, ErrorCode::EmployeeHasAccounts))?;
    if !deleted {
        return Err(not_found(id).into());
    }

    tracing::info!(employee_id = id, by = principal.id, "Employee deleted");
    Ok(Json(ApiResponse::ok()))
}
