use crate::model::user::{CreateUserRequest, CreatedUserResponse, UserResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::UserId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_user(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<CreatedUserResponse>)> {
    req.validate()?;

    registry
        .user_repository()
        .create(req.into())
        .await
        .map(|user_id| (StatusCode::CREATED, Json(CreatedUserResponse { user_id })))
}

pub async fn show_user(
    Path(user_id): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UserResponse>> {
    registry
        .user_repository()
        .find_by_id(user_id)
        .await
        .and_then(|user| match user {
            Some(u) => Ok(Json(u.into())),
            None => Err(AppError::EntityNotFound(format!(
                "利用者（{user_id}）が見つかりませんでした。"
            ))),
        })
}
