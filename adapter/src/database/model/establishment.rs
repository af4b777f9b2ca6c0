use kernel::model::{establishment::Establishment, id::EstablishmentId};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct EstablishmentRow {
    pub establishment_id: EstablishmentId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub cuisine_type: Option<String>,
}

impl From<EstablishmentRow> for Establishment {
    fn from(value: EstablishmentRow) -> Self {
        let EstablishmentRow {
            establishment_id,
            name,
            address,
            phone,
            cuisine_type,
        } = value;
        Establishment {
            establishment_id,
            name,
            address,
            phone,
            cuisine_type,
        }
    }
}
