use crate::model::id::ReservationId;
use crate::model::reservation::{
    event::{ReleaseBag, ReserveBags},
    Reservation,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約操作を行う。要求されたバッグ全てを確保できた場合のみ成功する
    async fn reserve(&self, event: ReserveBags) -> AppResult<ReservationId>;
    // reservation_id から明細付きの予約情報を取得する
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Reservation>;
    // 予約済みバッグを解放し、再度予約可能な状態に戻す
    async fn release(&self, event: ReleaseBag) -> AppResult<()>;
}
