use crate::model::id::EstablishmentId;

pub mod event;

// 店舗情報。作成後は変更しない
#[derive(Debug, Clone)]
pub struct Establishment {
    pub establishment_id: EstablishmentId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub cuisine_type: Option<String>,
}
