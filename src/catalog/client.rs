use reqwest::Client;

/// Client for the category and product services. The two may share a host
/// (a single catalog deployment) or be split; each gets its own base URL.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    pub(super) category_base: String,
    pub(super) product_base: String,
    pub(super) http: Client,
}

impl CatalogClient {
    pub fn new(category_base: &str, product_base: &str, http: Client) -> Self {
        Self {
            category_base: category_base.trim_end_matches('/').to_string(),
            product_base: product_base.trim_end_matches('/').to_string(),
            http,
        }
    }
}
