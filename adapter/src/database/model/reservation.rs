use chrono::{DateTime, Utc};
use kernel::model::{
    id::{BagId, EstablishmentId, ReservationId, ReservationItemId, UserId},
    reservation::{ReservationBag, ReservationItem},
};
use shared::error::AppError;
use sqlx::FromRow;

#[derive(FromRow)]
pub struct ReservationRow {
    pub reservation_id: ReservationId,
    pub user_id: UserId,
    pub reserved_at: DateTime<Utc>,
}

// 予約明細をバッグ・店舗情報と JOIN して取得する際に使う型
#[derive(FromRow)]
pub struct ReservationItemRow {
    pub reservation_item_id: ReservationItemId,
    pub bag_id: BagId,
    pub bag_type: String,
    pub size: String,
    pub price: f64,
    pub establishment_id: EstablishmentId,
    pub establishment_name: String,
}

impl TryFrom<ReservationItemRow> for ReservationItem {
    type Error = AppError;

    fn try_from(value: ReservationItemRow) -> Result<Self, Self::Error> {
        let ReservationItemRow {
            reservation_item_id,
            bag_id,
            bag_type,
            size,
            price,
            establishment_id,
            establishment_name,
        } = value;
        Ok(ReservationItem {
            reservation_item_id,
            bag: ReservationBag {
                bag_id,
                bag_type: bag_type.parse()?,
                size: size.parse()?,
                price,
                establishment_id,
                establishment_name,
            },
        })
    }
}

// release 操作で対象バッグの予約明細を特定するための型
#[derive(FromRow)]
pub struct ReservedBagStateRow {
    pub reservation_item_id: ReservationItemId,
    pub reservation_id: ReservationId,
}
