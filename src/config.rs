use std::env;
use std::path::PathBuf;

const DEFAULT_CATALOG_URL: &str = "http://ecommerce-catalog-service.127.0.0.1.nip.io";
const DEFAULT_IMAGE_URL: &str = "http://ecommerce-image-service.127.0.0.1.nip.io";

/// Seeder runtime configuration, read from environment variables with
/// deployment defaults. `.env` is loaded by `main` before this runs.
#[derive(Debug, Clone)]
pub struct Config {
    pub category_service_url: String,
    pub product_service_url: String,
    pub image_service_url: String,
    pub data_dir: PathBuf,
    pub assets_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            category_service_url: base_url(env_or("CATEGORY_SERVICE_URL", DEFAULT_CATALOG_URL)),
            product_service_url: base_url(env_or("PRODUCT_SERVICE_URL", DEFAULT_CATALOG_URL)),
            image_service_url: base_url(env_or("IMAGE_SERVICE_URL", DEFAULT_IMAGE_URL)),
            data_dir: env_or("DATA_DIR", "data").into(),
            assets_dir: env_or("ASSETS_DIR", "assets").into(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn base_url(raw: String) -> String {
    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_strips_trailing_slashes() {
        assert_eq!(base_url("http://localhost:8080/".into()), "http://localhost:8080");
        assert_eq!(base_url("http://localhost:8080".into()), "http://localhost:8080");
    }
}
