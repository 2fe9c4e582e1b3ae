//! Loan API Handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    Action, Created, LOAN_STATUSES, Loan, LoanCreate, LoanQuery, LoanUpdate, ResourceType,
};

use crate::auth::Principal;
use crate::core::ServerState;
use crate::db::LoanFields;
use crate::utils::validation::{non_negative, one_of, positive};
use crate::utils::{ApiResult, AppJson, AppPath, AppQuery, ServiceError};

const RESOURCE: ResourceType = ResourceType::Loan;

fn validate(payload: LoanCreate) -> Result<LoanFields, AppError> {
    if payload.term_months <= 0 {
        return Err(AppError::validation("term_months must be greater than zero")
            .with_detail("field", "term_months"));
    }
    Ok(LoanFields {
        client_id: payload.client_id,
        employee_id: payload.employee_id,
        branch_id: payload.branch_id,
        amount: positive(payload.amount, "amount")?,
        interest_rate: non_negative(payload.interest_rate, "interest_rate")?,
        term_months: payload.term_months,
        approved_on: payload.approved_on.unwrap_or_else(|| Utc::now().date_naive()),
        status: one_of(&payload.status, "status", LOAN_STATUSES)?,
    })
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::LoanNotFound).with_detail("id", id)
}

/// GET /api/loans
pub async fn list(
    State(state): State<ServerState>,
    principal: Principal,
    AppQuery(query): AppQuery<LoanQuery>,
) -> ApiResult<Vec<Loan>> {
    principal.require(RESOURCE, Action::Read)?;
    Ok(Json(state.loans.list(&query).await?))
}

/// GET /api/loans/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Loan> {
    principal.require(RESOURCE, Action::Read)?;
    let loan = state.loans.find(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(loan))
}

/// POST /api/loans
pub async fn create(
    State(state): State<ServerState>,
    principal: Principal,
    AppJson(payload): AppJson<LoanCreate>,
) -> Result<(StatusCode, Json<Created>), ServiceError> {
    principal.require(RESOURCE, Action::Create)?;
    let fields = validate(payload)?;
    let client_id = fields.client_id;
    let id = state.loans.create(fields).await?;
    tracing::info!(loan_id = id, client_id, by = principal.id, "Loan registered");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// PUT /api/loans/{id}
pub async fn update(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<LoanUpdate>,
) -> ApiResult<Loan> {
    principal.require(RESOURCE, Action::Update)?;
    if !state.loans.update(id, validate(payload)?).await? {
        return Err(not_found(id).into());
    }
    let loan = state.loans.find(id).await?.ok_or_else(|| not_found(id))?;
    tracing::info!(loan_id = id, by = principal.id, "Loan updated");
    Ok(Json(loan))
}

/// DELETE /api/loans/{id}
pub async fn delete(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    principal.require(RESOURCE, Action::Delete)?;
    if !state.loans.delete(id).await? {
        return Err(not_found(id).into());
    }
    tracing::info!(loan_id = id, by = principal.id, "Loan deleted");
    Ok(Json(ApiResponse::ok()))
}
