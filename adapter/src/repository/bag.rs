use crate::database::model::bag::BagRow;
use crate::database::ConnectionPool;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::bag::{event::CreateBag, Bag, BagState, BagType};
use kernel::model::id::{BagId, EstablishmentId};
use kernel::repository::bag::BagRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct BagRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BagRepository for BagRepositoryImpl {
    async fn create(&self, event: CreateBag) -> AppResult<BagId> {
        // 書き込み前の検証。スキーマの CHECK 制約とは独立に、
        // 呼び出し側へ具体的な typed error を返すためここでも調べる
        if event.price < 0.0 {
            return Err(AppError::UnprocessableEntity(format!(
                "価格（price = {}）が負の値です。",
                event.price
            )));
        }
        if event.pickup_start >= event.pickup_end {
            return Err(AppError::UnprocessableEntity(format!(
                "受け取り時間帯が不正です（start = {}, end = {}）。",
                event.pickup_start, event.pickup_end
            )));
        }
        // surprise バッグの中身は受け取りまで未知なので、内容リストを持てない
        if event.bag_type == BagType::Surprise && !event.content.is_empty() {
            return Err(AppError::UnprocessableEntity(
                "surprise バッグに内容リストは指定できません。".into(),
            ));
        }

        let mut tx = self.db.begin().await?;

        // 店舗の存在確認
        let establishment: Option<(EstablishmentId,)> = sqlx::query_as(
            r#"
                SELECT establishment_id
                FROM establishments
                WHERE establishment_id = ?
            "#,
        )
        .bind(event.establishment_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if establishment.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "店舗（{}）が見つかりませんでした。",
                event.establishment_id
            )));
        }

        let bag_id = BagId::new();
        let content = serde_json::to_string(&event.content).map_err(|e| {
            AppError::ConversionEntityError(format!(
                "内容リストを保存形式に変換できませんでした: {e}"
            ))
        })?;
        let res = sqlx::query(
            r#"
                INSERT INTO bags
                (bag_id, bag_type, size, price, content,
                pickup_start, pickup_end, state, establishment_id)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(bag_id)
        .bind(event.bag_type.to_string())
        .bind(event.size.to_string())
        .bind(event.price)
        .bind(content)
        .bind(event.pickup_start)
        .bind(event.pickup_end)
        .bind(BagState::Available.to_string())
        .bind(event.establishment_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No bag record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(bag_id)
    }

    async fn find_by_id(&self, bag_id: BagId) -> AppResult<Option<Bag>> {
        let row: Option<BagRow> = sqlx::query_as(
            r#"
                SELECT
                    bag_id, bag_type, size, price, content,
                    pickup_start, pickup_end, state, establishment_id
                FROM bags
                WHERE bag_id = ?
            "#,
        )
        .bind(bag_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Bag::try_from).transpose()
    }

    async fn find_by_establishment_id(
        &self,
        establishment_id: EstablishmentId,
    ) -> AppResult<Vec<Bag>> {
        let rows: Vec<BagRow> = sqlx::query_as(
            r#"
                SELECT
                    bag_id, bag_type, size, price, content,
                    pickup_start, pickup_end, state, establishment_id
                FROM bags
                WHERE establishment_id = ?
            "#,
        )
        .bind(establishment_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Bag::try_from).collect()
    }
}
