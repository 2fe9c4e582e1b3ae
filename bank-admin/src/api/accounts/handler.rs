//! Account API Handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    ACCOUNT_STATUSES, ACCOUNT_TYPES, Account, AccountCreate, AccountQuery, AccountUpdate, Action,
    Created, ResourceType,
};

use crate::auth::Principal;
use crate::core::ServerState;
use crate::db::{AccountFields, constraint};
use crate::utils::validation::{non_negative, one_of};
use crate::utils::{ApiResult, AppJson, AppPath, AppQuery, ServiceError, delete_blocked};

const RESOURCE: ResourceType = ResourceType::Account;

fn validate(payload: AccountCreate) -> Result<AccountFields, AppError> {
    Ok(AccountFields {
        client_id: payload.client_id,
        branch_id: payload.branch_id,
        employee_id: payload.employee_id,
        account_type: one_of(&payload.account_type, "account_type", ACCOUNT_TYPES)?,
        balance: non_negative(payload.balance.unwrap_or(0.0), "balance")?,
        opened_on: payload.opened_on.unwrap_or_else(|| Utc::now().date_naive()),
        status: one_of(&payload.status, "status", ACCOUNT_STATUSES)?,
    })
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::AccountNotFound).with_detail("id", id)
}

/// GET /api/accounts
pub async fn list(
    State(state): State<ServerState>,
    principal: Principal,
    AppQuery(query): AppQuery<AccountQuery>,
) -> ApiResult<Vec<Account>> {
    principal.require(RESOURCE, Action::Read)?;
    Ok(Json(state.accounts.list(&query).await?))
}

/// GET /api/accounts/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Account> {
    principal.require(RESOURCE, Action::Read)?;
    let account = state.accounts.find(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(account))
}

/// POST /api/accounts
///
/// Client, branch and employee must exist (`InvalidReference` otherwise).
pub async fn create(
    State(state): State<ServerState>,
    principal: Principal,
    AppJson(payload): AppJson<AccountCreate>,
) -> Result<(StatusCode, Json<Created>), ServiceError> {
    principal.require(RESOURCE, Action::Create)?;
    let fields = validate(payload)?;
    let client_id = fields.client_id;
    let id = state.accounts.create(fields).await?;
    tracing::info!(account_id = id, client_id, by = principal.id, "Account opened");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// PUT /api/accounts/{id}
pub async fn update(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<AccountUpdate>,
) -> ApiResult<Account> {
    principal.require(RESOURCE, Action::Update)?;
    if !state.accounts.update(id, validate(payload)?).await? {
        return Err(not_found(id).into());
    }
    let account = state.accounts.find(id).await?.ok_or_else(|| not_found(id))?;
    tracing::info!(account_id = id, by = principal.id, "Account updated");
    Ok(Json(account))
}

/// DELETE /api/accounts/{id}
///
/// Refused while the account has transactions. Cards issued on it block it
/// too.
pub async fn delete(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    principal.require(RESOURCE, Action::Delete)?;

    let transactions = state.accounts.transaction_count(id).await?;
    if transactions > 0 {
        return Err(AppError::new(ErrorCode::AccountHasTransactions)
            .with_detail("transactions", transactions)
            .into());
    }
    let deleted = state.accounts.delete(id).await.map_err(delete_blocked(
        constraint::TRANSACTION_ACCOUNT,
        ErrorCode::AccountHasTransactions,
    ))?;
    if !deleted {
        return Err(not_found(id).into());
    }

    tracing::info!(account_id = id, by = principal.id, "Account deleted");
    Ok(Json(ApiResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> AccountCreate {
        AccountCreate {
            client_id: 1,
            branch_id: 2,
            employee_id: 3,
            account_type: "Checking".into(),
            balance: None,
            opened_on: None,
            status: "Active".into(),
        }
    }

    #[test]
    fn test_validate_defaults_balance() {
        let fields = validate(payload()).unwrap();
        assert_eq!(fields.balance, 0.0);
        assert_eq!(fields.opened_on, Utc::now().date_naive());
    }

    #[test]
    fn test_validate_rejects_unknown_type_and_negative_balance() {
        let bad_type = AccountCreate {
            account_type: "Crypto".into(),
            ..payload()
        };
        assert_eq!(validate(bad_type).unwrap_err().code, ErrorCode::ValidationFailed);

        let overdrawn = AccountCreate {
            balance: Some(-5.0),
            ..payload()
        };
        let err = validate(overdrawn).unwrap_err();
        assert_eq!(err.details.unwrap()["field"], "balance");
    }
}
