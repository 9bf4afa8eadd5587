//! Adoptable pet listings

use super::{ApiRequest, ClientError, PawClient};
use crate::types::{
    AdoptionApplyRequest, AdoptionApplyResponse, Paginated, Pet, PetListParams, PetPayload,
};

const PETS: &str = "/pet/";

/// Pet listing endpoints under `/pet/`
pub struct PetsApi<'a> {
    client: &'a PawClient,
}

impl PawClient {
    /// Adoptable pet listings
    pub fn pets(&self) -> PetsApi<'_> {
        PetsApi { client: self }
    }
}

impl PetsApi<'_> {
    pub async fn list(&self, params: &PetListParams) -> Result<Paginated<Pet>, ClientError> {
        let req = ApiRequest::get(PETS).query(params)?;
        self.client.execute(req).await
    }

    pub async fn detail(&self, id: u64) -> Result<Pet, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{PETS}{id}/")))
            .await
    }

    pub async fn create(&self, pet: &PetPayload) -> Result<Pet, ClientError> {
        let req = ApiRequest::post(PETS).json(pet)?;
        self.client.execute(req).await
    }

    pub async fn update(&self, id: u64, pet: &PetPayload) -> Result<Pet, ClientError> {
        let req = ApiRequest::patch(format!("{PETS}{id}/")).json(pet)?;
        self.client.execute(req).await
    }

    pub async fn remove(&self, id: u64) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::delete(format!("{PETS}{id}/")))
            .await
    }

    /// Apply to adopt a pet. The body omits `message` when there is none.
    pub async fn apply(
        &self,
        id: u64,
        message: Option<&str>,
    ) -> Result<AdoptionApplyResponse, ClientError> {
        let body = AdoptionApplyRequest {
            message: message.map(str::to_string),
        };
        let req = ApiRequest::post(format!("{PETS}{id}/apply/")).json(&body)?;
        self.client.execute(req).await
    }
}
