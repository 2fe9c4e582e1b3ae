//! Transaction API Handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    Action, Created, ResourceType, TRANSACTION_TYPES, Transaction, TransactionCreate,
    TransactionQuery, TransactionUpdate,
};

use crate::auth::Principal;
use crate::core::ServerState;
use crate::db::TransactionFields;
use crate::utils::validation::{MAX_NOTE_LEN, one_of, optional_text, positive};
use crate::utils::{ApiResult, AppJson, AppPath, AppQuery, ServiceError};

const RESOURCE: ResourceType = ResourceType::Transaction;

fn validate(payload: TransactionCreate) -> Result<TransactionFields, AppError> {
    Ok(TransactionFields {
        account_id: payload.account_id,
        employee_id: payload.employee_id,
        transaction_type: one_of(&payload.transaction_type, "transaction_type", TRANSACTION_TYPES)?,
        amount: positive(payload.amount, "amount")?,
        occurred_at: payload.occurred_at.unwrap_or_else(Utc::now),
        description: optional_text(payload.description, "description", MAX_NOTE_LEN)?,
    })
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::TransactionNotFound).with_detail("id", id)
}

/// GET /api/transactions
pub async fn list(
    State(state): State<ServerState>,
    principal: Principal,
    AppQuery(query): AppQuery<TransactionQuery>,
) -> ApiResult<Vec<Transaction>> {
    principal.require(RESOURCE, Action::Read)?;
    Ok(Json(state.transactions.list(&query).await?))
}

/// GET /api/transactions/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Transaction> {
    principal.require(RESOURCE, Action::Read)?;
    let tx = state.transactions.find(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(tx))
}

/// POST /api/transactions
pub async fn create(
    State(state): State<ServerState>,
    principal: Principal,
    AppJson(payload): AppJson<TransactionCreate>,
) -> Result<(StatusCode, Json<Created>), ServiceError> {
    principal.require(RESOURCE, Action::Create)?;
    let fields = validate(payload)?;
    let account_id = fields.account_id;
    let id = state.transactions.create(fields).await?;
    tracing::info!(transaction_id = id, account_id, by = principal.id, "Transaction recorded");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// PUT /api/transactions/{id}
pub async fn update(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<TransactionUpdate>,
) -> ApiResult<Transaction> {
    principal.require(RESOURCE, Action::Update)?;
    if !state.transactions.update(id, validate(payload)?).await? {
        return Err(not_found(id).into());
    }
    let tx = state.transactions.find(id).await?.ok_or_else(|| not_found(id))?;
    tracing::info!(transaction_id = id, by = principal.id, "Transaction updated");
    Ok(Json(tx))
}

/// DELETE /api/transactions/{id}
pub async fn delete(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    principal.require(RESOURCE, Action::Delete)?;
    if !state.transactions.delete(id).await? {
        return Err(not_found(id).into());
    }
    tracing::info!(transaction_id = id, by = principal.id, "Transaction deleted");
    Ok(Json(ApiResponse::ok()))
}
