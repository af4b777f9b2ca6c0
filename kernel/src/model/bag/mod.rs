use crate::model::id::{BagId, EstablishmentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BagType {
    Surprise,
    Regular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BagSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BagState {
    Available,
    Reserved,
}

impl std::fmt::Display for BagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BagType::Surprise => "surprise",
            BagType::Regular => "regular",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for BagType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "surprise" => Ok(BagType::Surprise),
            "regular" => Ok(BagType::Regular),
            other => Err(AppError::ConversionEntityError(format!(
                "不正なバッグ種別です: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for BagSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BagSize::Small => "small",
            BagSize::Medium => "medium",
            BagSize::Large => "large",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for BagSize {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(BagSize::Small),
            "medium" => Ok(BagSize::Medium),
            "large" => Ok(BagSize::Large),
            other => Err(AppError::ConversionEntityError(format!(
                "不正なバッグサイズです: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for BagState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BagState::Available => "available",
            BagState::Reserved => "reserved",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for BagState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(BagState::Available),
            "reserved" => Ok(BagState::Reserved),
            other => Err(AppError::ConversionEntityError(format!(
                "不正なバッグ状態です: {other}"
            ))),
        }
    }
}

// regular バッグの中身 1 品目。surprise バッグは空のまま
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagContentItem {
    pub name: String,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct Bag {
    pub bag_id: BagId,
    pub bag_type: BagType,
    pub size: BagSize,
    pub price: f64,
    pub content: Vec<BagContentItem>,
    pub pickup_start: DateTime<Utc>,
    pub pickup_end: DateTime<Utc>,
    pub state: BagState,
    pub establishment_id: EstablishmentId,
}

// 価格昇順に並べ替える。同価格の場合はバッグ ID 昇順で順序を確定させる
pub fn sort_bags_by_price(mut bags: Vec<Bag>) -> Vec<Bag> {
    bags.sort_by(|a, b| {
        a.price
            .total_cmp(&b.price)
            .then_with(|| a.bag_id.cmp(&b.bag_id))
    });
    bags
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn bag(bag_id: BagId, price: f64) -> Bag {
        Bag {
            bag_id,
            bag_type: BagType::Regular,
            size: BagSize::Medium,
            price,
            content: vec![],
            pickup_start: Utc.with_ymd_and_hms(2025, 4, 5, 10, 0, 0).unwrap(),
            pickup_end: Utc.with_ymd_and_hms(2025, 4, 5, 11, 0, 0).unwrap(),
            state: BagState::Available,
            establishment_id: EstablishmentId::new(),
        }
    }

    #[test]
    fn sort_by_price_breaks_ties_by_id() {
        // 同価格のバッグは ID 昇順になる
        let id1 = BagId::from(Uuid::from_u128(1));
        let id2 = BagId::from(Uuid::from_u128(2));
        let id3 = BagId::from(Uuid::from_u128(3));

        let sorted = sort_bags_by_price(vec![bag(id3, 5.0), bag(id1, 5.0), bag(id2, 3.0)]);

        let order: Vec<BagId> = sorted.iter().map(|b| b.bag_id).collect();
        assert_eq!(order, vec![id2, id1, id3]);
    }

    #[test]
    fn sort_by_price_is_ascending() {
        let id1 = BagId::from(Uuid::from_u128(1));
        let id2 = BagId::from(Uuid::from_u128(2));
        let id3 = BagId::from(Uuid::from_u128(3));

        let sorted = sort_bags_by_price(vec![bag(id1, 7.5), bag(id2, 5.99), bag(id3, 6.0)]);
        let prices: Vec<f64> = sorted.iter().map(|b| b.price).collect();
        assert_eq!(prices, vec![5.99, 6.0, 7.5]);
    }

    #[test]
    fn bag_enum_round_trips() {
        for s in ["surprise", "regular"] {
            assert_eq!(s.parse::<BagType>().unwrap().to_string(), s);
        }
        for s in ["small", "medium", "large"] {
            assert_eq!(s.parse::<BagSize>().unwrap().to_string(), s);
        }
        for s in ["available", "reserved"] {
            assert_eq!(s.parse::<BagState>().unwrap().to_string(), s);
        }
        assert!("gigantic".parse::<BagSize>().is_err());
    }
}
