use crate::model::bag::{BagResponse, CreateBagRequest, CreatedBagResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::BagId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_bag(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBagRequest>,
) -> AppResult<(StatusCode, Json<CreatedBagResponse>)> {
    req.validate()?;

    registry
        .bag_repository()
        .create(req.into())
        .await
        .map(|bag_id| (StatusCode::CREATED, Json(CreatedBagResponse { bag_id })))
}

pub async fn show_bag(
    Path(bag_id): Path<BagId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BagResponse>> {
    registry
        .bag_repository()
        .find_by_id(bag_id)
        .await
        .and_then(|bag| match bag {
            Some(b) => Ok(Json(b.into())),
            None => Err(AppError::EntityNotFound(format!(
                "バッグ（{bag_id}）が見つかりませんでした。"
            ))),
        })
}
