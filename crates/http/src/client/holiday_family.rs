//! "Holiday family" foster applications

use super::{ApiRequest, ClientError, FileUpload, MultipartForm, PawClient};
use crate::types::{ApplicationList, HolidayFamilyApplication, RejectRequest};
use serde_json::Value as JsonValue;

const HOLIDAY_FAMILY: &str = "/holiday-family";

/// Which animals the family can take in
#[derive(Debug, Clone, Default)]
pub struct PetTypes {
    pub dogs: bool,
    pub cats: bool,
    pub rabbits: bool,
    /// Free text for anything else
    pub others: String,
}

/// A new foster application
#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub postal_code: String,
    pub street_address: String,
    pub pet_count: u32,
    pub pet_types: PetTypes,
    pub motivation: String,
    pub introduction: String,
    pub id_document: Option<FileUpload>,
    pub family_photos: Vec<FileUpload>,
    pub terms_agreed: bool,
}

impl ApplicationForm {
    /// Encode as form fields; photos become `family_photos_0`, `family_photos_1`, ...
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("full_name", &self.full_name)
            .text("email", &self.email)
            .text("phone", &self.phone)
            .text("country", &self.country)
            .text("state", &self.state)
            .text("city", &self.city)
            .text("postal_code", &self.postal_code)
            .text("street_address", &self.street_address)
            .text("pet_count", self.pet_count.to_string())
            .text("can_take_dogs", self.pet_types.dogs.to_string())
            .text("can_take_cats", self.pet_types.cats.to_string())
            .text("can_take_rabbits", self.pet_types.rabbits.to_string())
            .text("can_take_others", &self.pet_types.others)
            .text("motivation", &self.motivation)
            .text("introduction", &self.introduction)
            .text("terms_agreed", self.terms_agreed.to_string())
            .file_opt("id_document", self.id_document.clone());

        for (index, photo) in self.family_photos.iter().enumerate() {
            form = form.file(format!("family_photos_{index}"), photo.clone());
        }
        form
    }
}

/// Fields an applicant may still change; unset ones are not sent
#[derive(Debug, Clone, Default)]
pub struct ApplicationUpdate {
    pub phone: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub motivation: Option<String>,
    pub introduction: Option<String>,
}

impl ApplicationUpdate {
    pub fn to_form(&self) -> MultipartForm {
        MultipartForm::new()
            .text_non_empty("phone", self.phone.as_deref())
            .text_non_empty("street_address", self.street_address.as_deref())
            .text_non_empty("city", self.city.as_deref())
            .text_non_empty("state", self.state.as_deref())
            .text_non_empty("postal_code", self.postal_code.as_deref())
            .text_non_empty("motivation", self.motivation.as_deref())
            .text_non_empty("introduction", self.introduction.as_deref())
    }
}

/// Holiday family endpoints under `/holiday-family/`
pub struct HolidayFamilyApi<'a> {
    client: &'a PawClient,
}

impl PawClient {
    /// Foster family applications
    pub fn holiday_family(&self) -> HolidayFamilyApi<'_> {
        HolidayFamilyApi { client: self }
    }
}

impl HolidayFamilyApi<'_> {
    pub async fn apply(&self, form: &ApplicationForm) -> Result<JsonValue, ClientError> {
        let req = ApiRequest::post(format!("{HOLIDAY_FAMILY}/apply/")).multipart(form.to_form());
        self.client.execute(req).await
    }

    pub async fn detail(&self, id: u64) -> Result<HolidayFamilyApplication, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{HOLIDAY_FAMILY}/{id}/")))
            .await
    }

    /// The current user's own application
    pub async fn my_application(&self) -> Result<HolidayFamilyApplication, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{HOLIDAY_FAMILY}/my-application/")))
            .await
    }

    /// All applications (staff only)
    pub async fn list(&self) -> Result<Vec<HolidayFamilyApplication>, ClientError> {
        let list: ApplicationList = self
            .client
            .execute(ApiRequest::get(format!("{HOLIDAY_FAMILY}/")))
            .await?;
        Ok(list.into_vec())
    }

    pub async fn approve(&self, id: u64) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::post(format!("{HOLIDAY_FAMILY}/{id}/approve/")))
            .await
    }

    pub async fn reject(&self, id: u64, reason: &str) -> Result<(), ClientError> {
        let req = ApiRequest::post(format!("{HOLIDAY_FAMILY}/{id}/reject/")).json(&RejectRequest {
            reason: reason.to_string(),
        })?;
        self.client.execute_empty(req).await
    }

    /// Approved application of another user, shown on their profile
    pub async fn user_application(
        &self,
        user_id: u64,
    ) -> Result<HolidayFamilyApplication, ClientError> {
        self.client
            .execute(ApiRequest::get(format!(
                "{HOLIDAY_FAMILY}/user-application/{user_id}/"
            )))
            .await
    }

    pub async fn update_application(
        &self,
        id: u64,
        update: &ApplicationUpdate,
    ) -> Result<JsonValue, ClientError> {
        let req = ApiRequest::patch(format!("{HOLIDAY_FAMILY}/{id}/update_application/"))
            .multipart(update.to_form());
        self.client.execute(req).await
    }

    /// Add new family photos and remove existing ones by id
    pub async fn update_photos(
        &self,
        id: u64,
        new_photos: &[FileUpload],
        delete_photo_ids: &[u64],
    ) -> Result<JsonValue, ClientError> {
        let mut form = MultipartForm::new();
        for photo_id in delete_photo_ids {
            form = form.text("delete_photo_ids", photo_id.to_string());
        }
        for photo in new_photos {
            form = form.file("family_photos", photo.clone());
        }
        let req = ApiRequest::post(format!("{HOLIDAY_FAMILY}/{id}/update_photos/")).multipart(form);
        self.client.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::request::FormPart;

    #[test]
    fn photos_are_numbered() {
        let form = ApplicationForm {
            full_name: "Jan Kowalski".into(),
            pet_count: 2,
            pet_types: PetTypes {
                dogs: true,
                ..PetTypes::default()
            },
            family_photos: vec![
                FileUpload::new("garden.jpg", b"1".to_vec()),
                FileUpload::new("house.jpg", b"2".to_vec()),
            ],
            terms_agreed: true,
            ..ApplicationForm::default()
        }
        .to_form();

        assert_eq!(form.text_value("pet_count"), Some("2"));
        assert_eq!(form.text_value("can_take_dogs"), Some("true"));
        assert_eq!(form.text_value("can_take_cats"), Some("false"));
        assert_eq!(form.text_value("terms_agreed"), Some("true"));

        let files: Vec<&str> = form
            .parts()
            .iter()
            .filter_map(|p| match p {
                FormPart::File { name, .. } => Some(name.as_str()),
                FormPart::Text { .. } => None,
            })
            .collect();
        assert_eq!(files, vec!["family_photos_0", "family_photos_1"]);
    }

    #[test]
    fn update_sends_only_changed_fields() {
        let form = ApplicationUpdate {
            phone: Some("+48 600 000 000".into()),
            city: Some(String::new()),
            ..ApplicationUpdate::default()
        }
        .to_form();
        assert_eq!(form.parts().len(), 1);
        assert_eq!(form.text_value("phone"), Some("+48 600 000 000"));
    }
}
