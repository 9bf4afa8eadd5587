//! Lost pet reports

use super::{ApiRequest, ClientError, FileUpload, MultipartForm, PawClient};
use crate::types::{LostListParams, LostPet, Paginated};

const LOST: &str = "/pet/lost/";

/// Lost report fields. Required for create: `species`, `sex`, `address`,
/// `lost_time`. For updates leave everything else unset.
#[derive(Debug, Clone, Default)]
pub struct LostPayload {
    pub pet_name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub color: Option<String>,
    pub sex: Option<String>,
    pub size: Option<String>,
    pub address: Option<u64>,
    pub lost_time: Option<String>,
    pub description: Option<String>,
    /// Free-form amount; an empty string is not sent
    pub reward: Option<String>,
    pub photo: Option<FileUpload>,
}

impl LostPayload {
    pub fn to_form(&self) -> MultipartForm {
        MultipartForm::new()
            .text_non_empty("pet_name", self.pet_name.as_deref())
            .text_non_empty("species", self.species.as_deref())
            .text_non_empty("breed", self.breed.as_deref())
            .text_non_empty("color", self.color.as_deref())
            .text_non_empty("sex", self.sex.as_deref())
            .text_non_empty("size", self.size.as_deref())
            .text_opt("address", self.address)
            .text_non_empty("lost_time", self.lost_time.as_deref())
            .text_non_empty("description", self.description.as_deref())
            .text_non_empty("reward", self.reward.as_deref())
            .file_opt("photo", self.photo.clone())
    }
}

/// Lost report endpoints under `/pet/lost/`
pub struct LostApi<'a> {
    client: &'a PawClient,
}

impl PawClient {
    /// Lost pet reports
    pub fn lost(&self) -> LostApi<'_> {
        LostApi { client: self }
    }
}

impl LostApi<'_> {
    pub async fn list(&self, params: &LostListParams) -> Result<Paginated<LostPet>, ClientError> {
        let req = ApiRequest::get(LOST).query(params)?;
        self.client.execute(req).await
    }

    pub async fn retrieve(&self, id: u64) -> Result<LostPet, ClientError> {
        self.client
            .execute(ApiRequest::get(format!("{LOST}{id}/")))
            .await
    }

    pub async fn create(&self, report: &LostPayload) -> Result<LostPet, ClientError> {
        let req = ApiRequest::post(LOST).multipart(report.to_form());
        self.client.execute(req).await
    }

    pub async fn update(&self, id: u64, report: &LostPayload) -> Result<LostPet, ClientError> {
        let req = ApiRequest::patch(format!("{LOST}{id}/")).multipart(report.to_form());
        self.client.execute(req).await
    }

    pub async fn remove(&self, id: u64) -> Result<(), ClientError> {
        self.client
            .execute_empty(ApiRequest::delete(format!("{LOST}{id}/")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reward_is_omitted() {
        let report = LostPayload {
            species: Some("dog".into()),
            sex: Some("male".into()),
            address: Some(12),
            lost_time: Some("2024-06-01T08:30".into()),
            reward: Some(String::new()),
            ..LostPayload::default()
        };
        let form = report.to_form();
        assert_eq!(form.text_value("reward"), None);
        assert_eq!(form.text_value("address"), Some("12"));
        assert_eq!(form.parts().len(), 4);
    }
}
