use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    bag::{BagSize, BagType},
    id::{BagId, EstablishmentId, ReservationId, ReservationItemId, UserId},
    reservation::{Reservation, ReservationBag, ReservationItem},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[garde(skip)]
    pub user_id: UserId,
    #[garde(length(min = 1))]
    pub bag_ids: Vec<BagId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub reservation_id: ReservationId,
    pub reserved_by: UserId,
    pub reserved_at: DateTime<Utc>,
    pub items: Vec<ReservationItemResponse>,
}

impl From<Reservation> for ReservationResponse {
    fn from(value: Reservation) -> Self {
        let Reservation {
            reservation_id,
            reserved_by,
            reserved_at,
            items,
        } = value;
        Self {
            reservation_id,
            reserved_by,
            reserved_at,
            items: items.into_iter().map(ReservationItemResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationItemResponse {
    pub reservation_item_id: ReservationItemId,
    pub bag: ReservationBagResponse,
}

impl From<ReservationItem> for ReservationItemResponse {
    fn from(value: ReservationItem) -> Self {
        let ReservationItem {
            reservation_item_id,
            bag,
        } = value;
        Self {
            reservation_item_id,
            bag: bag.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationBagResponse {
    pub bag_id: BagId,
    pub bag_type: BagType,
    pub size: BagSize,
    pub price: f64,
    pub establishment_id: EstablishmentId,
    pub establishment_name: String,
}

impl From<ReservationBag> for ReservationBagResponse {
    fn from(value: ReservationBag) -> Self {
        let ReservationBag {
            bag_id,
            bag_type,
            size,
            price,
            establishment_id,
            establishment_name,
        } = value;
        Self {
            bag_id,
            bag_type,
            size,
            price,
            establishment_id,
            establishment_name,
        }
    }
}
