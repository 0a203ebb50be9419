use crate::catalog::client::CatalogClient;
use crate::error::{Lookup, SeedError};
use crate::http::expect_json;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: String,
    pub enabled: bool,
    pub version: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: Uuid,
    pub name: String,
    pub enabled: bool,
    pub version: i64,
}

impl CatalogClient {
    pub async fn get_category(&self, id: Uuid) -> Result<Lookup<CategoryRecord>, SeedError> {
        let url = format!("{}/categories/{id}", self.category_base);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| SeedError::network(&url, err))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }
        Ok(Lookup::Found(expect_json(response).await?))
    }

    pub async fn create_category(
        &self,
        request: &CreateCategoryRequest,
    ) -> Result<CategoryRecord, SeedError> {
        let url = format!("{}/categories", self.category_base);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| SeedError::network(&url, err))?;
        expect_json(response).await
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        request: &UpdateCategoryRequest,
    ) -> Result<CategoryRecord, SeedError> {
        let url = format!("{}/categories/{id}", self.category_base);
        let response = self
            .http
            .put(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| SeedError::network(&url, err))?;
        expect_json(response).await
    }
}
