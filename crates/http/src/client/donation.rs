//! Pets offered for adoption by their owners

use super::{ApiRequest, ClientError, FileUpload, MultipartForm, PawClient};
use crate::types::{AddressData, PageQuery};
use serde_json::Value as JsonValue;

const DONATIONS: &str = "/pet/donation/";

/// A pet handed over for adoption, with its health and temperament traits
#[derive(Debug, Clone, Default)]
pub struct DonationPayload {
    pub name: String,
    pub species: Option<String>,
    pub breed: Option<String>,
    /// `male`, `female` or `unknown`
    pub sex: Option<String>,
    pub age_years: Option<u32>,
    pub age_months: Option<u32>,
    pub description: Option<String>,
    pub address: Option<u64>,
    pub address_data: Option<AddressData>,
    pub contact_phone: Option<String>,
    pub photos: Vec<FileUpload>,
    pub traits: DonationTraits,
}

/// Yes/no traits; unset ones are not sent
#[derive(Debug, Clone, Copy, Default)]
pub struct DonationTraits {
    pub dewormed: Option<bool>,
    pub vaccinated: Option<bool>,
    pub microchipped: Option<bool>,
    pub is_stray: Option<bool>,
    pub sterilized: Option<bool>,
    pub child_friendly: Option<bool>,
    pub trained: Option<bool>,
    pub loves_play: Option<bool>,
    pub loves_walks: Option<bool>,
    pub good_with_dogs: Option<bool>,
    pub good_with_cats: Option<bool>,
    pub affectionate: Option<bool>,
    pub needs_attention: Option<bool>,
}

impl DonationPayload {
    /// Encode as form fields, one `photos` part per photo
    ///
    /// # Errors
    ///
    /// Fails if `address_data` cannot be serialized
    pub fn to_form(&self) -> Result<MultipartForm, ClientError> {
        let t = &self.traits;
        let mut form = MultipartForm::new()
            .text_non_empty("name", Some(self.name.as_str()))
            .text_non_empty("species", self.species.as_deref())
            .text_non_empty("breed", self.breed.as_deref())
            .text_non_empty("sex", self.sex.as_deref())
            .text_opt("age_years", self.age_years)
            .text_opt("age_months", self.age_months)
            .text_non_empty("description", self.description.as_deref())
            .text_opt("address", self.address)
            .flag("dewormed", t.dewormed)
            .flag("vaccinated", t.vaccinated)
            .flag("microchipped", t.microchipped)
            .flag("is_stray", t.is_stray)
            .flag("sterilized", t.sterilized)
            .flag("child_friendly", t.child_friendly)
            .flag("trained", t.trained)
            .flag("loves_play", t.loves_play)
            .flag("loves_walks", t.loves_walks)
            .flag("good_with_dogs", t.good_with_dogs)
            .flag("good_with_cats", t.good_with_cats)
            .flag("affectionate", t.affectionate)
            .flag("needs_attention", t.needs_attention)
            .text_non_empty("contact_phone", self.contact_phone.as_deref());

        for photo in &self.photos {
            form = form.file("photos", photo.clone());
        }
        if let Some(address) = &self.address_data {
            form = form.text("address_data", serde_json::to_string(address)?);
        }
        Ok(form)
    }
}

/// Donation endpoints under `/pet/donation/`
pub struct DonationsApi<'a> {
    client: &'a PawClient,
}

impl PawClient {
    /// Owner-surrendered pets
    pub fn donations(&self) -> DonationsApi<'_> {
        DonationsApi { client: self }
    }
}

impl DonationsApi<'_> {
    pub async fn list(&self, page: &PageQuery) -> Result<JsonValue, ClientError> {
        let req = ApiRequest::get(DONATIONS).query(page)?;
        self.client.execute(req).await
    }

    pub async fn retrieve(&self, id: u64) -> Result<JsonValue, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{DONATIONS}{id}/")))
            .await
    }

    pub async fn create(&self, donation: &DonationPayload) -> Result<JsonValue, ClientError> {
        let req = ApiRequest::post(DONATIONS).multipart(donation.to_form()?);
        self.client.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::request::FormPart;

    #[test]
    fn photos_are_repeated_parts() {
        let payload = DonationPayload {
            name: "Burek".into(),
            sex: Some("male".into()),
            photos: vec![
                FileUpload::new("a.jpg", b"a".to_vec()),
                FileUpload::new("b.jpg", b"b".to_vec()),
            ],
            traits: DonationTraits {
                vaccinated: Some(true),
                ..DonationTraits::default()
            },
            ..DonationPayload::default()
        };

        let form = payload.to_form().unwrap();
        let photos = form
            .parts()
            .iter()
            .filter(|p| matches!(p, FormPart::File { name, .. } if name == "photos"))
            .count();
        assert_eq!(photos, 2);
        assert_eq!(form.text_value("vaccinated"), Some("true"));
        assert_eq!(form.text_value("dewormed"), None);
        assert_eq!(form.text_value("address_data"), None);
    }
}
