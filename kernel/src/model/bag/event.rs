use crate::model::bag::{BagContentItem, BagSize, BagType};
use crate::model::id::EstablishmentId;
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateBag {
    pub bag_type: BagType,
    pub size: BagSize,
    pub price: f64,
    pub content: Vec<BagContentItem>,
    pub pickup_start: DateTime<Utc>,
    pub pickup_end: DateTime<Utc>,
    pub establishment_id: EstablishmentId,
}
