//! Country / region / city lookups and stored addresses

use super::{ApiRequest, ClientError, PawClient};
use crate::types::{Address, AddressSearchResponse, City, Country, Region};

/// Address endpoints under `/pet/`
pub struct AddressApi<'a> {
    client: &'a PawClient,
}

impl PawClient {
    pub fn addresses(&self) -> AddressApi<'_> {
        AddressApi { client: self }
    }
}

impl AddressApi<'_> {
    pub async fn countries(&self) -> Result<Vec<Country>, ClientError> {
        self.client.execute(ApiRequest::get("/pet/countries/")).await
    }

    pub async fn regions(&self, country_id: u64) -> Result<Vec<Region>, ClientError> {
        let req = ApiRequest::get("/pet/regions/").param("country", country_id);
        self.client.execute(req).await
    }

    pub async fn cities(&self, region_id: u64) -> Result<Vec<City>, ClientError> {
        let req = ApiRequest::get("/pet/cities/").param("region", region_id);
        self.client.execute(req).await
    }

    pub async fn create(&self, address: &Address) -> Result<Address, ClientError> {
        let req = ApiRequest::post("/pet/address/").json(address)?;
        self.client.execute(req).await
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Address>, ClientError> {
        let req = ApiRequest::get("/pet/address/").param("search", query);
        let response: AddressSearchResponse = self.client.execute(req).await?;
        Ok(response.results)
    }
}
