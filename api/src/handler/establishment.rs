use crate::model::bag::{BagListQuery, BagSortKey, BagsResponse};
use crate::model::establishment::{
    CreateEstablishmentRequest, CreatedEstablishmentResponse, EstablishmentResponse,
    EstablishmentsResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{bag::sort_bags_by_price, id::EstablishmentId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn register_establishment(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEstablishmentRequest>,
) -> AppResult<(StatusCode, Json<CreatedEstablishmentResponse>)> {
    req.validate()?;

    registry
        .establishment_repository()
        .create(req.into())
        .await
        .map(|establishment_id| {
            (
                StatusCode::CREATED,
                Json(CreatedEstablishmentResponse { establishment_id }),
            )
        })
}

pub async fn show_establishment_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EstablishmentsResponse>> {
    registry
        .establishment_repository()
        .find_all()
        .await
        .map(EstablishmentsResponse::from)
        .map(Json)
}

pub async fn show_establishment(
    Path(establishment_id): Path<EstablishmentId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EstablishmentResponse>> {
    registry
        .establishment_repository()
        .find_by_id(establishment_id)
        .await
        .and_then(|establishment| match establishment {
            Some(e) => Ok(Json(e.into())),
            None => Err(AppError::EntityNotFound(format!(
                "店舗（{establishment_id}）が見つかりませんでした。"
            ))),
        })
}

// 店舗のバッグ一覧。?sort=price で価格昇順（同価格は ID 昇順）になる
pub async fn show_establishment_bags(
    Path(establishment_id): Path<EstablishmentId>,
    Query(query): Query<BagListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BagsResponse>> {
    if registry
        .establishment_repository()
        .find_by_id(establishment_id)
        .await?
        .is_none()
    {
        return Err(AppError::EntityNotFound(format!(
            "店舗（{establishment_id}）が見つかりませんでした。"
        )));
    }

    let bags = registry
        .bag_repository()
        .find_by_establishment_id(establishment_id)
        .await?;

    let bags = match query.sort {
        Some(BagSortKey::Price) => sort_bags_by_price(bags),
        None => bags,
    };

    Ok(Json(bags.into()))
}
