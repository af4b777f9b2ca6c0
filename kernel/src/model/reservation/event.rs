use crate::model::id::{BagId, UserId};
use chrono::{DateTime, Utc};
use derive_new::new;

#[derive(new, Debug)]
pub struct ReserveBags {
    pub reserved_by: UserId,
    pub reserved_at: DateTime<Utc>,
    pub bag_ids: Vec<BagId>,
}

#[derive(new, Debug)]
pub struct ReleaseBag {
    pub bag_id: BagId,
}
