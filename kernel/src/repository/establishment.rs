use crate::model::establishment::{event::CreateEstablishment, Establishment};
use crate::model::id::EstablishmentId;
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait EstablishmentRepository: Send + Sync {
    // 店舗を登録する
    async fn create(&self, event: CreateEstablishment) -> AppResult<EstablishmentId>;
    // 登録済みの店舗一覧を取得する
    async fn find_all(&self) -> AppResult<Vec<Establishment>>;
    // 店舗 ID から店舗情報を取得する
    async fn find_by_id(&self, establishment_id: EstablishmentId)
        -> AppResult<Option<Establishment>>;
}
