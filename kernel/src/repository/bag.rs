use crate::model::bag::{event::CreateBag, Bag};
use crate::model::id::{BagId, EstablishmentId};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait BagRepository: Send + Sync {
    // バッグを出品する
    async fn create(&self, event: CreateBag) -> AppResult<BagId>;
    // バッグ ID からバッグ情報を取得する
    async fn find_by_id(&self, bag_id: BagId) -> AppResult<Option<Bag>>;
    // 店舗 ID に紐づくバッグ一覧を取得する。並び順は保証しない
    async fn find_by_establishment_id(
        &self,
        establishment_id: EstablishmentId,
    ) -> AppResult<Vec<Bag>>;
}
