use garde::Validate;
use kernel::model::{
    establishment::{event::CreateEstablishment, Establishment},
    id::EstablishmentId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEstablishmentRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub address: Option<String>,
    #[garde(skip)]
    pub phone: Option<String>,
    #[garde(skip)]
    pub cuisine_type: Option<String>,
}

impl From<CreateEstablishmentRequest> for CreateEstablishment {
    fn from(value: CreateEstablishmentRequest) -> Self {
        let CreateEstablishmentRequest {
            name,
            address,
            phone,
            cuisine_type,
        } = value;
        CreateEstablishment {
            name,
            address,
            phone,
            cuisine_type,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEstablishmentResponse {
    pub establishment_id: EstablishmentId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentResponse {
    pub establishment_id: EstablishmentId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub cuisine_type: Option<String>,
}

impl From<Establishment> for EstablishmentResponse {
    fn from(value: Establishment) -> Self {
        let Establishment {
            establishment_id,
            name,
            address,
            phone,
            cuisine_type,
        } = value;
        Self {
            establishment_id,
            name,
            address,
            phone,
            cuisine_type,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentsResponse {
    pub items: Vec<EstablishmentResponse>,
}

impl From<Vec<Establishment>> for EstablishmentsResponse {
    fn from(value: Vec<Establishment>) -> Self {
        Self {
            items: value.into_iter().map(EstablishmentResponse::from).collect(),
        }
    }
}
