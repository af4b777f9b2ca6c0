use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    bag::{event::CreateBag, Bag, BagContentItem, BagSize, BagState, BagType},
    id::{BagId, EstablishmentId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBagRequest {
    #[garde(skip)]
    pub bag_type: BagType,
    #[garde(skip)]
    pub size: BagSize,
    #[garde(range(min = 0.0))]
    pub price: f64,
    #[garde(skip)]
    #[serde(default)]
    pub content: Vec<BagContentItemRequest>,
    #[garde(skip)]
    pub pickup_start: DateTime<Utc>,
    #[garde(skip)]
    pub pickup_end: DateTime<Utc>,
    #[garde(skip)]
    pub establishment_id: EstablishmentId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BagContentItemRequest {
    pub name: String,
    pub quantity: i32,
}

impl From<CreateBagRequest> for CreateBag {
    fn from(value: CreateBagRequest) -> Self {
        let CreateBagRequest {
            bag_type,
            size,
            price,
            content,
            pickup_start,
            pickup_end,
            establishment_id,
        } = value;
        CreateBag {
            bag_type,
            size,
            price,
            content: content
                .into_iter()
                .map(|item| BagContentItem {
                    name: item.name,
                    quantity: item.quantity,
                })
                .collect(),
            pickup_start,
            pickup_end,
            establishment_id,
        }
    }
}

// 一覧取得時の並び替え指定（?sort=price）
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BagListQuery {
    pub sort: Option<BagSortKey>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BagSortKey {
    Price,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBagResponse {
    pub bag_id: BagId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BagResponse {
    pub bag_id: BagId,
    pub bag_type: BagType,
    pub size: BagSize,
    pub price: f64,
    pub content: Vec<BagContentItemResponse>,
    pub pickup_start: DateTime<Utc>,
    pub pickup_end: DateTime<Utc>,
    pub state: BagState,
    pub establishment_id: EstablishmentId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BagContentItemResponse {
    pub name: String,
    pub quantity: i32,
}

impl From<Bag> for BagResponse {
    fn from(value: Bag) -> Self {
        let Bag {
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
        Self {
            bag_id,
            bag_type,
            size,
            price,
            content: content
                .into_iter()
                .map(|item| BagContentItemResponse {
                    name: item.name,
                    quantity: item.quantity,
                })
                .collect(),
            pickup_start,
            pickup_end,
            state,
            establishment_id,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BagsResponse {
    pub items: Vec<BagResponse>,
}

impl From<Vec<Bag>> for BagsResponse {
    fn from(value: Vec<Bag>) -> Self {
        Self {
            items: value.into_iter().map(BagResponse::from).collect(),
        }
    }
}
