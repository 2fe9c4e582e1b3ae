//! Credit Card API Handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::{Months, Utc};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    Action, CARD_STATUSES, CARD_TYPES, Created, CreditCard, CreditCardCreate, CreditCardQuery,
    CreditCardUpdate, ResourceType,
};

use crate::auth::Principal;
use crate::core::ServerState;
use crate::db::CreditCardFields;
use crate::utils::validation::{card_number, non_negative, one_of};
use crate::utils::{ApiResult, AppJson, AppPath, AppQuery, ServiceError};

const RESOURCE: ResourceType = ResourceType::CreditCard;

/// Validity of a card issued without an explicit expiry
const DEFAULT_VALIDITY: Months = Months::new(48);

fn validate(payload: CreditCardCreate) -> Result<CreditCardFields, AppError> {
    let issued_on = payload.issued_on.unwrap_or_else(|| Utc::now().date_naive());
    let expires_on = match payload.expires_on {
        Some(date) => date,
        None => issued_on
            .checked_add_months(DEFAULT_VALIDITY)
            .ok_or_else(|| AppError::validation("issued_on is out of range"))?,
    };
    if expires_on <= issued_on {
        return Err(AppError::validation("expires_on must be after issued_on")
            .with_detail("field", "expires_on"));
    }

    Ok(CreditCardFields {
        account_id: payload.account_id,
        client_id: payload.client_id,
        card_type: one_of(&payload.card_type, "card_type", CARD_TYPES)?,
        number: card_number(&payload.number)?,
        credit_limit: non_negative(payload.credit_limit, "credit_limit")?,
        issued_on,
        expires_on,
        status: one_of(&payload.status, "status", CARD_STATUSES)?,
    })
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::CreditCardNotFound).with_detail("id", id)
}

/// GET /api/credit-cards
pub async fn list(
    State(state): State<ServerState>,
    principal: Principal,
    AppQuery(query): AppQuery<CreditCardQuery>,
) -> ApiResult<Vec<CreditCard>> {
    principal.require(RESOURCE, Action::Read)?;
    Ok(Json(state.cards.list(&query).await?))
}

/// GET /api/credit-cards/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<CreditCard> {
    principal.require(RESOURCE, Action::Read)?;
    let card = state.cards.find(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(card))
}

/// POST /api/credit-cards
pub async fn create(
    State(state): State<ServerState>,
    principal: Principal,
    AppJson(payload): AppJson<CreditCardCreate>,
) -> Result<(StatusCode, Json<Created>), ServiceError> {
    principal.require(RESOURCE, Action::Create)?;
    let fields = validate(payload)?;
    let client_id = fields.client_id;
    let id = state.cards.create(fields).await?;
    // the card number is not logged
    tracing::info!(card_id = id, client_id, by = principal.id, "Credit card issued");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// PUT /api/credit-cards/{id}
pub async fn update(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CreditCardUpdate>,
) -> ApiResult<CreditCard> {
    principal.require(RESOURCE, Action::Update)?;
    if !state.cards.update(id, validate(payload)?).await? {
        return Err(not_found(id).into());
    }
    let card = state.cards.find(id).await?.ok_or_else(|| not_found(id))?;
    tracing::info!(card_id = id, by = principal.id, "Credit card updated");
    Ok(Json(card))
}

/// DELETE /api/credit-cards/{id}
pub async fn delete(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    principal.require(RESOURCE, Action::Delete)?;
    if !state.cards.delete(id).await? {
        return Err(not_found(id).into());
    }
    tracing::info!(card_id = id, by = principal.id, "Credit card deleted");
    Ok(Json(ApiResponse::ok()))
}
