use crate::error::SeedError;
use crate::http::{expect_json, expect_success};
use chrono::Utc;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use uuid::Uuid;

const OWNER_TYPE_DRAFT: &str = "draft";
const IMAGE_ROLE_MAIN: &str = "main";

/// Client for the image service. Uploads run the three-step
/// presign -> transfer -> confirm protocol; each step is a single attempt
/// and any failure aborts the whole upload.
#[derive(Debug, Clone)]
pub struct ImageClient {
    base_url: String,
    http: Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageContentType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/webp")]
    Webp,
    #[serde(rename = "image/avif")]
    Avif,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PresignRequest<'a> {
    owner_type: &'static str,
    owner_id: String,
    filename: &'a str,
    content_type: ImageContentType,
    size: usize,
    role: &'static str,
}

/// Short-lived authorization to push bytes directly to storage. The service
/// returns the form fields the storage backend requires on the transfer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignGrant {
    pub upload_url: String,
    pub upload_token: String,
    #[serde(default)]
    pub form_data: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmRequest<'a> {
    upload_token: &'a str,
    alt: &'a str,
    role: &'static str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageRecord {
    id: Uuid,
}

impl ImageClient {
    pub fn new(base_url: &str, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Upload a local image file and return the durable image id.
    pub async fn upload(&self, path: &Path, alt_text: &str) -> Result<Uuid, SeedError> {
        let content = read_image(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image.jpg");
        let content_type = infer_content_type(filename, &content);

        let grant = self
            .create_presign(filename, content_type, content.len())
            .await?;
        self.transfer(&grant, content, filename).await?;
        self.confirm(&grant.upload_token, alt_text).await
    }

    async fn create_presign(
        &self,
        filename: &str,
        content_type: ImageContentType,
        size: usize,
    ) -> Result<PresignGrant, SeedError> {
        let url = format!("{}/images/presign", self.base_url);
        let request = PresignRequest {
            owner_type: OWNER_TYPE_DRAFT,
            // Synthetic owner, unique per run.
            owner_id: format!("seed_{}", Utc::now().format("%Y%m%d%H%M%S")),
            filename,
            content_type,
            size,
            role: IMAGE_ROLE_MAIN,
        };
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| SeedError::network(&url, err))?;
        expect_json(response).await
    }

    async fn transfer(
        &self,
        grant: &PresignGrant,
        content: Vec<u8>,
        filename: &str,
    ) -> Result<(), SeedError> {
        let mut form = Form::new();
        for (key, value) in &grant.form_data {
            form = form.text(key.clone(), value.clone());
        }
        form = form.part("file", Part::bytes(content).file_name(filename.to_string()));

        let response = self
            .http
            .post(&grant.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| SeedError::network(&grant.upload_url, err))?;
        expect_success(response).await
    }

    async fn confirm(&self, upload_token: &str, alt_text: &str) -> Result<Uuid, SeedError> {
        let url = format!("{}/images/confirm", self.base_url);
        let request = ConfirmRequest {
            upload_token,
            alt: alt_text,
            role: IMAGE_ROLE_MAIN,
        };
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| SeedError::network(&url, err))?;
        let image: ImageRecord = expect_json(response).await?;
        Ok(image.id)
    }
}

fn read_image(path: &Path) -> Result<Vec<u8>, SeedError> {
    if !path.is_file() {
        return Err(SeedError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Infer the content type from the file extension, falling back to
/// magic-byte sniffing, defaulting to JPEG when inconclusive.
pub fn infer_content_type(filename: &str, content: &[u8]) -> ImageContentType {
    from_extension(filename)
        .or_else(|| sniff(content))
        .unwrap_or(ImageContentType::Jpeg)
}

fn from_extension(filename: &str) -> Option<ImageContentType> {
    let ext = Path::new(filename)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(ImageContentType::Jpeg),
        "png" => Some(ImageContentType::Png),
        "webp" => Some(ImageContentType::Webp),
        "avif" => Some(ImageContentType::Avif),
        _ => None,
    }
}

fn sniff(content: &[u8]) -> Option<ImageContentType> {
    if content.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(ImageContentType::Jpeg);
    }
    if content.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(ImageContentType::Png);
    }
    if content.len() >= 12 && &content[..4] == b"RIFF" && &content[8..12] == b"WEBP" {
        return Some(ImageContentType::Webp);
    }
    if content.len() >= 12 && &content[4..8] == b"ftyp" && &content[8..12] == b"avif" {
        return Some(ImageContentType::Avif);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0];

    #[test]
    fn extension_wins_regardless_of_case() {
        assert_eq!(infer_content_type("photo.PNG", b""), ImageContentType::Png);
        assert_eq!(infer_content_type("photo.JPeG", b""), ImageContentType::Jpeg);
        assert_eq!(infer_content_type("a.webp", b""), ImageContentType::Webp);
        assert_eq!(infer_content_type("a.avif", b""), ImageContentType::Avif);
    }

    #[test]
    fn unknown_extension_falls_back_to_sniffing() {
        assert_eq!(
            infer_content_type("photo.bin", PNG_MAGIC),
            ImageContentType::Png
        );
        assert_eq!(
            infer_content_type("photo", JPEG_MAGIC),
            ImageContentType::Jpeg
        );
        let mut webp = Vec::from(*b"RIFF");
        webp.extend_from_slice(&[0, 0, 0, 0]);
        webp.extend_from_slice(b"WEBP");
        assert_eq!(infer_content_type("x", &webp), ImageContentType::Webp);
    }

    #[test]
    fn inconclusive_defaults_to_jpeg() {
        assert_eq!(
            infer_content_type("mystery", b"not an image"),
            ImageContentType::Jpeg
        );
    }

    #[test]
    fn content_type_serializes_to_mime() {
        assert_eq!(
            serde_json::to_string(&ImageContentType::Webp).unwrap(),
            "\"image/webp\""
        );
    }
}
