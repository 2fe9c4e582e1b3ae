//! Client API Handlers

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Action, Client, ClientCreate, ClientQuery, ClientUpdate, Created, ResourceType};

use crate::auth::Principal;
use crate::core::ServerState;
use crate::db::{ClientFields, constraint};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, optional_text, required_text,
};
use crate::utils::{ApiResult, AppJson, AppPath, AppQuery, ServiceError, delete_blocked};

const RESOURCE: ResourceType = ResourceType::Client;

/// Trim the payload and apply defaults; names are mandatory
fn validate(payload: ClientCreate) -> Result<ClientFields, AppError> {
    Ok(ClientFields {
        first_name: required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?,
        last_name: required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?,
        address: optional_text(payload.address, "address", MAX_ADDRESS_LEN)?,
        phone: optional_text(payload.phone, "phone", MAX_SHORT_TEXT_LEN)?,
        email: optional_text(payload.email, "email", MAX_EMAIL_LEN)?,
        registered_on: payload
            .registered_on
            .unwrap_or_else(|| Utc::now().date_naive()),
    })
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::ClientNotFound).with_detail("id", id)
}

/// GET /api/clients
pub async fn list(
    State(state): State<ServerState>,
    principal: Principal,
    AppQuery(query): AppQuery<ClientQuery>,
) -> ApiResult<Vec<Client>> {
    principal.require(RESOURCE, Action::Read)?;
    let clients = state.clients.list(&query).await?;
    Ok(Json(clients))
}

/// GET /api/clients/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<Client> {
    principal.require(RESOURCE, Action::Read)?;
    let client = state.clients.find(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(client))
}

/// POST /api/clients
pub async fn create(
    State(state): State<ServerState>,
    principal: Principal,
    AppJson(payload): AppJson<ClientCreate>,
) -> Result<(StatusCode, Json<Created>), ServiceError> {
    principal.require(RESOURCE, Action::Create)?;
    let fields = validate(payload)?;
    let id = state.clients.create(fields).await?;
    tracing::info!(client_id = id, by = principal.id, "Client created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// PUT /api/clients/{id}
pub async fn update(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<ClientUpdate>,
) -> ApiResult<Client> {
    principal.require(RESOURCE, Action::Update)?;
    let fields = validate(payload)?;
    if !state.clients.update(id, fields).await? {
        return Err(not_found(id).into());
    }
    let client = state.clients.find(id).await?.ok_or_else(|| not_found(id))?;
    tracing::info!(client_id = id, by = principal.id, "Client updated");
    Ok(Json(client))
}

/// DELETE /api/clients/{id}
///
/// Refused while any account still references the client. Loans and cards
/// block it too (`StillReferenced`).
pub async fn delete(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    principal.require(RESOURCE, Action::Delete)?;

    let accounts = state.clients.account_count(id).await?;
    if accounts > 0 {
        return Err(AppError::new(ErrorCode::ClientHasAccounts)
            .with_detail("accounts", accounts)
            .into());
    }
    let deleted = state
        .clients
        .delete(id)
        .await
        .map_err(delete_blocked(constraint::ACCOUNT_CLIENT, ErrorCode::ClientHasAccounts))?;
    if !deleted {
        return Err(not_found(id).into());
    }

    tracing::info!(client_id = id, by = principal.id, "Client deleted");
    Ok(Json(ApiResponse::ok()))
}
