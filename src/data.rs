use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("no {stem}.yaml, {stem}.yml or {stem}.json under {}", .dir.display())]
    Missing { stem: &'static str, dir: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

/// Demo content to reconcile against the remote services, in declaration
/// order. Categories are always processed before products.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub image_file: Option<String>,
    #[serde(default)]
    pub enabled: bool,
}

impl Category {
    /// Declared id, with empty strings treated as "not declared".
    pub fn declared_id(&self) -> Option<&str> {
        non_empty(&self.id)
    }
}

impl Product {
    pub fn declared_id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    pub fn declared_category_id(&self) -> Option<&str> {
        non_empty(&self.category_id)
    }

    pub fn declared_image_file(&self) -> Option<&str> {
        non_empty(&self.image_file)
    }

    /// Description to submit; an empty string is omitted from the wire
    /// payload entirely.
    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Load seed data from a directory holding `categories.*` and `products.*`,
/// each a YAML or JSON list. YAML wins when both are present.
pub fn load_from_dir(dir: &Path) -> Result<SeedData, DataError> {
    Ok(SeedData {
        categories: load_entries(dir, "categories")?,
        products: load_entries(dir, "products")?,
    })
}

fn load_entries<T: DeserializeOwned>(dir: &Path, stem: &'static str) -> Result<Vec<T>, DataError> {
    for ext in ["yaml", "yml", "json"] {
        let path = dir.join(format!("{stem}.{ext}"));
        if path.is_file() {
            return parse_file(&path);
        }
    }
    Err(DataError::Missing {
        stem,
        dir: dir.to_path_buf(),
    })
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DataError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    if is_json {
        serde_json::from_str(&raw).map_err(|err| DataError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    } else {
        serde_yaml::from_str(&raw).map_err(|err| DataError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_yaml_lists() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("categories.yaml"),
            "- id: 1f0d1a52-9f58-4f4c-93b8-000000000001\n  name: Shoes\n  enabled: true\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("products.yaml"),
            concat!(
                "- name: Sneaker\n",
                "  price: 49.99\n",
                "  quantity: 10\n",
                "  categoryId: 1f0d1a52-9f58-4f4c-93b8-000000000001\n",
                "  imageFile: sneaker.jpg\n",
                "  enabled: true\n",
            ),
        )
        .unwrap();

        let data = load_from_dir(dir.path()).unwrap();
        assert_eq!(data.categories.len(), 1);
        assert_eq!(data.categories[0].name, "Shoes");
        assert!(data.categories[0].enabled);
        assert_eq!(data.products[0].declared_image_file(), Some("sneaker.jpg"));
        assert_eq!(data.products[0].declared_id(), None);
    }

    #[test]
    fn loads_json_when_yaml_absent() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("categories.json"),
            r#"[{"id": "", "name": "Books", "enabled": false}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("products.json"), "[]").unwrap();

        let data = load_from_dir(dir.path()).unwrap();
        assert_eq!(data.categories[0].name, "Books");
        assert_eq!(data.categories[0].declared_id(), None);
        assert!(data.products.is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("categories.yaml"), "[]").unwrap();
        let err = load_from_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DataError::Missing { stem: "products", .. }));
    }

    #[test]
    fn empty_strings_normalize_to_absent() {
        let product: Product = serde_yaml::from_str(concat!(
            "name: Plain\n",
            "description: \"\"\n",
            "price: 1.0\n",
            "quantity: 1\n",
            "categoryId: \"\"\n",
        ))
        .unwrap();
        assert_eq!(product.description(), None);
        assert_eq!(product.declared_category_id(), None);
        assert_eq!(product.declared_image_file(), None);
        assert!(!product.enabled);
    }
}
