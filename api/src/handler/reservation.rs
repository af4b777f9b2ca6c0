use crate::model::reservation::{CreateReservationRequest, ReservationResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::{BagId, ReservationId};
use kernel::model::reservation::event::{ReleaseBag, ReserveBags};
use registry::AppRegistry;
use shared::error::AppResult;

// 予約 API。要求されたバッグ全てを確保できた場合のみ成功し、
// 成功時は明細付きの予約情報を返す
pub async fn reserve_bags(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    req.validate()?;

    let event = ReserveBags::new(req.user_id, chrono::Utc::now(), req.bag_ids);

    let reservation_id = registry.reservation_repository().reserve(event).await?;

    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .map(ReservationResponse::from)
        .map(|res| (StatusCode::CREATED, Json(res)))
}

pub async fn show_reservation(
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await
        .map(ReservationResponse::from)
        .map(Json)
}

pub async fn release_bag(
    Path(bag_id): Path<BagId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .reservation_repository()
        .release(ReleaseBag::new(bag_id))
        .await
        .map(|_| StatusCode::OK)
}
