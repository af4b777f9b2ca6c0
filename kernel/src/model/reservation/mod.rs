use crate::model::bag::{BagSize, BagType};
use crate::model::id::{BagId, EstablishmentId, ReservationId, ReservationItemId, UserId};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug)]
pub struct Reservation {
    pub reservation_id: ReservationId,
    pub reserved_by: UserId,
    pub reserved_at: DateTime<Utc>,
    pub items: Vec<ReservationItem>,
}

// 予約 1 件に含まれるバッグ 1 つ分の明細
#[derive(Debug)]
pub struct ReservationItem {
    pub reservation_item_id: ReservationItemId,
    pub bag: ReservationBag,
}

#[derive(Debug)]
pub struct ReservationBag {
    pub bag_id: BagId,
    pub bag_type: BagType,
    pub size: BagSize,
    pub price: f64,
    pub establishment_id: EstablishmentId,
    pub establishment_name: String,
}
