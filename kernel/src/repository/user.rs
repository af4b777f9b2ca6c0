use crate::model::id::UserId;
use crate::model::user::{event::CreateUser, User};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    // 利用者を登録する
    async fn create(&self, event: CreateUser) -> AppResult<UserId>;
    // 利用者 ID から利用者情報を取得する
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;
}
