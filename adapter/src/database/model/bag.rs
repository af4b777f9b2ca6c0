use chrono::{DateTime, Utc};
use kernel::model::{
    bag::{Bag, BagContentItem},
    id::{BagId, EstablishmentId},
};
use shared::error::AppError;
use sqlx::FromRow;

#[derive(FromRow)]
pub struct BagRow {
    pub bag_id: BagId,
    pub bag_type: String,
    pub size: String,
    pub price: f64,
    pub content: String,
    pub pickup_start: DateTime<Utc>,
    pub pickup_end: DateTime<Utc>,
    pub state: String,
    pub establishment_id: EstablishmentId,
}

// 列挙値と中身の JSON はデータベース上では文字列なので、
// ドメイン型への変換は失敗しうる。TryFrom で変換エラーを typed error にする
impl TryFrom<BagRow> for Bag {
    type Error = AppError;

    fn try_from(value: BagRow) -> Result<Self, Self::Error> {
        let BagRow {
            bag_id,
            bag_type,
            size,
            price,
            content,
            pickup_start,
            pickup_end,
            state,
            establishment_id,
        } = value;
        let content: Vec<BagContentItem> = serde_json::from_str(&content).map_err(|e| {
            AppError::ConversionEntityError(format!(
                "バッグ（{bag_id}）の内容リストを読み取れませんでした: {e}"
            ))
        })?;
        Ok(Bag {
            bag_id,
            bag_type: bag_type.parse()?,
            size: size.parse()?,
            price,
            content,
            pickup_start,
            pickup_end,
            state: state.parse()?,
            establishment_id,
        })
    }
}
