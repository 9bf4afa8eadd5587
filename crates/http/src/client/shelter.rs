//! Animal shelters

use super::{ApiRequest, ClientError, FileUpload, MultipartForm, PawClient};
use crate::types::{AddressData, Paginated, Shelter, ShelterListParams};

const SHELTERS: &str = "/pet/shelter/";

/// Shelter fields for create and update. Sent as `multipart/form-data`;
/// unset fields are left out.
#[derive(Debug, Clone, Default)]
pub struct ShelterPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    /// Existing address record
    pub address: Option<u64>,
    /// Inline address, sent as a JSON string
    pub address_data: Option<AddressData>,
    pub logo: Option<FileUpload>,
    pub cover_image: Option<FileUpload>,
    pub capacity: Option<u32>,
    pub current_animals: Option<u32>,
    pub founded_year: Option<i32>,
    pub is_verified: Option<bool>,
    pub is_active: Option<bool>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub twitter_url: Option<String>,
}

impl ShelterPayload {
    /// Encode as form fields
    ///
    /// # Errors
    ///
    /// Fails if `address_data` cannot be serialized
    pub fn to_form(&self) -> Result<MultipartForm, ClientError> {
        let address_data = self
            .address_data
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        Ok(MultipartForm::new()
            .text_non_empty("name", self.name.as_deref())
            .text_non_empty("description", self.description.as_deref())
            .text_non_empty("email", self.email.as_deref())
            .text_non_empty("phone", self.phone.as_deref())
            .text_non_empty("website", self.website.as_deref())
            .text_opt("address", self.address)
            .text_opt("address_data", address_data)
            .file_opt("logo", self.logo.clone())
            .file_opt("cover_image", self.cover_image.clone())
            .text_opt("capacity", self.capacity)
            .text_opt("current_animals", self.current_animals)
            .text_opt("founded_year", self.founded_year)
            .flag("is_verified", self.is_verified)
            .flag("is_active", self.is_active)
            .text_non_empty("facebook_url", self.facebook_url.as_deref())
            .text_non_empty("instagram_url", self.instagram_url.as_deref())
            .text_non_empty("twitter_url", self.twitter_url.as_deref()))
    }
}

/// Shelter endpoints under `/pet/shelter/`
pub struct SheltersApi<'a> {
    client: &'a PawClient,
}

impl PawClient {
    /// Animal shelters
    pub fn shelters(&self) -> SheltersApi<'_> {
        SheltersApi { client: self }
    }
}

impl SheltersApi<'_> {
    pub async fn list(
        &self,
        params: &ShelterListParams,
    ) -> Result<Paginated<Shelter>, ClientError> {
        let req = ApiRequest::get(SHELTERS).query(params)?;
        self.client.execute(req).await
    }

    pub async fn detail(&self, id: u64) -> Result<Shelter, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{SHELTERS}{id}/")))
            .await
    }

    pub async fn create(&self, shelter: &ShelterPayload) -> Result<Shelter, ClientError> {
        let req = ApiRequest::post(SHELTERS).multipart(shelter.to_form()?);
        self.client.execute(req).await
    }

    pub async fn update(&self, id: u64, shelter: &ShelterPayload) -> Result<Shelter, ClientError> {
        let req = ApiRequest::patch(format!("{SHELTERS}{id}/")).multipart(shelter.to_form()?);
        self.client.execute(req).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::delete(format!("{SHELTERS}{id}/")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_encodes_flags_and_address_json() {
        let payload = ShelterPayload {
            name: Some("Happy Tails".into()),
            capacity: Some(40),
            is_active: Some(true),
            is_verified: Some(false),
            address_data: Some(AddressData {
                city: Some("Gdansk".into()),
                ..AddressData::default()
            }),
            ..ShelterPayload::default()
        };

        let form = payload.to_form().unwrap();
        assert_eq!(form.text_value("name"), Some("Happy Tails"));
        assert_eq!(form.text_value("capacity"), Some("40"));
        assert_eq!(form.text_value("is_active"), Some("true"));
        assert_eq!(form.text_value("is_verified"), Some("false"));
        assert_eq!(form.text_value("address_data"), Some(r#"{"city":"Gdansk"}"#));
        assert_eq!(form.text_value("email"), None);
    }
}
