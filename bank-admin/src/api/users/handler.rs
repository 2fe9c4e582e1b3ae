//! User API Handlers

use axum::{Json, extract::State, http::StatusCode};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    Action, Created, ResourceType, Role, User, UserCreate, UserInfo, UserQuery, UserUpdate,
};
use shared::util::non_blank;

use crate::auth::{Principal, hash_password, role_display_name};
use crate::core::ServerState;
use crate::db::{NewUser, StoreError, UserChanges};
use crate::utils::{ApiResult, AppJson, AppPath, AppQuery, ServiceError, ServiceResult};

const RESOURCE: ResourceType = ResourceType::User;

fn to_info(user: User) -> UserInfo {
    UserInfo {
        role_display_name: role_display_name(&user.role),
        id: user.id,
        username: user.username,
        role: user.role,
        employee_id: user.employee_id,
        last_access: user.last_access,
    }
}

fn parse_role(raw: &str) -> ServiceResult<Role> {
    Role::parse(raw.trim()).ok_or_else(|| {
        AppError::with_message(ErrorCode::UnknownRole, format!("Unknown role: {}", raw.trim()))
            .into()
    })
}

/// argon2 is CPU-bound; hash on the blocking pool
async fn hash(password: String) -> ServiceResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")).into())
}

fn username_exists(username: &str) -> AppError {
    AppError::new(ErrorCode::UsernameExists).with_detail("username", username)
}

/// A concurrent write can take the username between the check and the
/// insert; the unique constraint then reports it
fn username_conflict(username: &str) -> impl FnOnce(StoreError) -> ServiceError + '_ {
    move |e| match e {
        StoreError::Duplicate(_) => username_exists(username).into(),
        other => other.into(),
    }
}

async fn ensure_username_free(
    state: &ServerState,
    username: &str,
    exclude_id: Option<i64>,
) -> ServiceResult<()> {
    if state.users.username_taken(username, exclude_id).await? {
        return Err(username_exists(username).into());
    }
    Ok(())
}

/// GET /api/users
pub async fn list(
    State(state): State<ServerState>,
    principal: Principal,
    AppQuery(query): AppQuery<UserQuery>,
) -> ApiResult<Vec<UserInfo>> {
    principal.require(RESOURCE, Action::Read)?;
    let users = state.users.list(&query).await?;
    Ok(Json(users.into_iter().map(to_info).collect()))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<UserInfo> {
    principal.require(RESOURCE, Action::Read)?;
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(to_info(user)))
}

/// POST /api/users
pub async fn create(
    State(state): State<ServerState>,
    principal: Principal,
    AppJson(payload): AppJson<UserCreate>,
) -> Result<(StatusCode, Json<Created>), ServiceError> {
    principal.require(RESOURCE, Action::Create)?;

    let username = non_blank(Some(payload.username.as_str()))
        .ok_or_else(|| AppError::required("username"))?;
    let role = parse_role(&payload.role)?;
    if payload.password.is_empty() {
        return Err(AppError::new(ErrorCode::PasswordRequired).into());
    }
    ensure_username_free(&state, username, None).await?;

    let id = state
        .users
        .create(NewUser {
            username: username.to_string(),
            password_hash: hash(payload.password).await?,
            role: role.as_str().to_string(),
            employee_id: payload.employee_id,
        })
        .await
        .map_err(username_conflict(username))?;

    tracing::info!(user_id = id, username, role = %role, by = principal.id, "User created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

/// PUT /api/users/{id}
///
/// An empty or missing password keeps the stored one.
pub async fn update(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UserUpdate>,
) -> ApiResult<UserInfo> {
    principal.require(RESOURCE, Action::Update)?;

    let username = non_blank(Some(payload.username.as_str()))
        .ok_or_else(|| AppError::required("username"))?;
    let role = parse_role(&payload.role)?;
    let password_hash = match payload.password {
        Some(pw) if !pw.is_empty() => Some(hash(pw).await?),
        _ => None,
    };
    ensure_username_free(&state, username, Some(id)).await?;

    let changes = UserChanges {
        username: username.to_string(),
        password_hash,
        role: role.as_str().to_string(),
        employee_id: payload.employee_id,
    };
    let updated = state
        .users
        .update(id, changes)
        .await
        .map_err(username_conflict(username))?;
    if !updated {
        return Err(AppError::new(ErrorCode::UserNotFound).into());
    }

    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    tracing::info!(user_id = id, by = principal.id, "User updated");
    Ok(Json(to_info(user)))
}

/// DELETE /api/users/{id}
///
/// Users cannot delete their own account. Sessions of the deleted user end
/// immediately.
pub async fn delete(
    State(state): State<ServerState>,
    principal: Principal,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<()>> {
    principal.require(RESOURCE, Action::Delete)?;

    if id == principal.id {
        return Err(AppError::new(ErrorCode::CannotDeleteSelf).into());
    }
    if !state.users.delete(id).await? {
        return Err(AppError::new(ErrorCode::UserNotFound).into());
    }

    let revoked = state.auth.sessions().revoke_user(id);
    tracing::info!(user_id = id, by = principal.id, revoked, "User deleted");
    Ok(Json(ApiResponse::ok()))
}
