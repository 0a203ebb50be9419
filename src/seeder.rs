use crate::catalog::{
    CatalogClient, CreateCategoryRequest, CreateProductRequest, UpdateCategoryRequest,
    UpdateProductRequest,
};
use crate::config::Config;
use crate::data::{Category, Product, SeedData};
use crate::error::{Lookup, SeedError, parse_uuid};
use crate::http::build_client;
use crate::images::ImageClient;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

/// Reconciles declared seed data against the remote services. Holds the
/// per-run image cache; everything else is stateless between entities.
pub struct Seeder {
    catalog: CatalogClient,
    images: ImageClient,
    assets_dir: PathBuf,
    image_cache: HashMap<String, Uuid>,
}

impl Seeder {
    pub fn new(config: &Config) -> Self {
        let http = build_client();
        Self {
            catalog: CatalogClient::new(
                &config.category_service_url,
                &config.product_service_url,
                http.clone(),
            ),
            images: ImageClient::new(&config.image_service_url, http),
            assets_dir: config.assets_dir.clone(),
            image_cache: HashMap::new(),
        }
    }

    /// Reconcile all categories, then all products, in declaration order.
    /// The first fatal error aborts the run; nothing is rolled back.
    pub async fn run(&mut self, data: &SeedData) -> Result<(), SeedError> {
        info!(
            target = "seeder.run",
            count = data.categories.len(),
            "upserting categories"
        );
        for category in &data.categories {
            self.upsert_category(category)
                .await
                .map_err(|err| SeedError::entity("category", category.name.as_str(), err))?;
        }

        info!(
            target = "seeder.run",
            count = data.products.len(),
            "upserting products"
        );
        for product in &data.products {
            self.upsert_product(product, &data.categories)
                .await
                .map_err(|err| SeedError::entity("product", product.name.as_str(), err))?;
        }
        Ok(())
    }

    async fn upsert_category(&self, category: &Category) -> Result<(), SeedError> {
        let id = match category.declared_id() {
            Some(raw) => Some(parse_uuid("category.id", raw)?),
            None => None,
        };
        let remote = match id {
            Some(id) => match self.catalog.get_category(id).await? {
                Lookup::Found(existing) => Some((id, existing.version)),
                Lookup::NotFound => None,
            },
            None => None,
        };

        match remote {
            Some((id, version)) => {
                let request = UpdateCategoryRequest {
                    name: category.name.clone(),
                    enabled: category.enabled,
                    version,
                };
                let updated = self.catalog.update_category(id, &request).await?;
                info!(
                    target = "seeder.catalog",
                    name = %category.name,
                    id = %updated.id,
                    "updated category"
                );
            }
            None => {
                let request = CreateCategoryRequest {
                    id,
                    name: category.name.clone(),
                    enabled: category.enabled,
                };
                let created = self.catalog.create_category(&request).await?;
                info!(
                    target = "seeder.catalog",
                    name = %category.name,
                    id = %created.id,
                    "created category"
                );
            }
        }
        Ok(())
    }

    async fn upsert_product(
        &mut self,
        product: &Product,
        categories: &[Category],
    ) -> Result<(), SeedError> {
        let category_id = match product.declared_category_id() {
            Some(raw) => Some(parse_uuid("product.categoryId", raw)?),
            None => None,
        };
        let id = match product.declared_id() {
            Some(raw) => Some(parse_uuid("product.id", raw)?),
            None => None,
        };
        let remote = match id {
            Some(id) => match self.catalog.get_product(id).await? {
                Lookup::Found(existing) => Some((id, existing.version)),
                Lookup::NotFound => None,
            },
            None => None,
        };

        let image_id = self
            .resolve_product_image(product, category_id, categories)
            .await;

        match remote {
            Some((id, version)) => {
                let request = UpdateProductRequest {
                    name: product.name.clone(),
                    description: product.description().map(str::to_string),
                    price: product.price,
                    quantity: product.quantity,
                    category_id,
                    image_id,
                    enabled: product.enabled,
                    version,
                };
                let updated = self.catalog.update_product(id, &request).await?;
                info!(
                    target = "seeder.catalog",
                    name = %product.name,
                    id = %updated.id,
                    "updated product"
                );
            }
            None => {
                let request = CreateProductRequest {
                    id,
                    name: product.name.clone(),
                    description: product.description().map(str::to_string),
                    price: product.price,
                    quantity: product.quantity,
                    category_id,
                    image_id,
                    enabled: product.enabled,
                };
                let created = self.catalog.create_product(&request).await?;
                info!(
                    target = "seeder.catalog",
                    name = %product.name,
                    id = %created.id,
                    "created product"
                );
            }
        }
        Ok(())
    }

    /// Resolve an image for the product: own image first, then the
    /// category-level fallback, then none. Failures here never fail the
    /// product; they are logged and the product ships without an image.
    async fn resolve_product_image(
        &mut self,
        product: &Product,
        category_id: Option<Uuid>,
        categories: &[Category],
    ) -> Option<Uuid> {
        let own_file = product
            .declared_image_file()
            .map(str::to_string)
            .or_else(|| product.declared_id().map(|id| format!("{id}.jpg")));
        if let Some(filename) = own_file {
            if let Some(image_id) = self.try_upload_image(&filename, &product.name).await {
                return Some(image_id);
            }
        }

        let category_id = category_id?;
        let filename = format!("category-{category_id}.png");
        let alt_text =
            category_display_name(categories, category_id).unwrap_or(product.name.as_str());
        self.try_upload_image(&filename, alt_text).await
    }

    async fn try_upload_image(&mut self, filename: &str, alt_text: &str) -> Option<Uuid> {
        if let Some(cached) = self.image_cache.get(filename) {
            return Some(*cached);
        }

        let path = self.assets_dir.join(filename);
        match self.images.upload(&path, alt_text).await {
            Ok(image_id) => {
                self.image_cache.insert(filename.to_string(), image_id);
                Some(image_id)
            }
            Err(err) => {
                warn!(
                    target = "seeder.images",
                    filename = filename,
                    error = %err,
                    "image upload skipped"
                );
                None
            }
        }
    }
}

fn category_display_name(categories: &[Category], id: Uuid) -> Option<&str> {
    categories
        .iter()
        .find(|category| {
            category
                .declared_id()
                .and_then(|raw| Uuid::parse_str(raw).ok())
                == Some(id)
        })
        .map(|category| category.name.as_str())
}
