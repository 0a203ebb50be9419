use crate::catalog::client::CatalogClient;
use crate::error::{Lookup, SeedError};
use crate::http::expect_json;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<Uuid>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<Uuid>,
    pub enabled: bool,
    pub version: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub image_id: Option<Uuid>,
    pub enabled: bool,
    pub version: i64,
}

impl CatalogClient {
    pub async fn get_product(&self, id: Uuid) -> Result<Lookup<ProductRecord>, SeedError> {
        let url = format!("{}/products/{id}", self.product_base);
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

    pub async fn create_product(
        &self,
        request: &CreateProductRequest,
    ) -> Result<ProductRecord, SeedError> {
        let url = format!("{}/products", self.product_base);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| SeedError::network(&url, err))?;
        expect_json(response).await
    }

    pub async fn update_product(
        &self,
        id: Uuid,
        request: &UpdateProductRequest,
    ) -> Result<ProductRecord, SeedError> {
        let url = format!("{}/products/{id}", self.product_base);
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
