use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Errors that abort a seeding run.
///
/// Image-resolution failures never surface through this type; they are
/// logged as warnings and degrade to "no image" (see `seeder`).
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid uuid in {field}: {value:?}")]
    Validation { field: &'static str, value: String },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response from {url}: HTTP {status}: {body}")]
    UnexpectedResponse {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("image file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to upsert {kind} {name:?}: {source}")]
    Entity {
        kind: &'static str,
        name: String,
        #[source]
        source: Box<SeedError>,
    },
}

impl SeedError {
    pub fn invalid_uuid(field: &'static str, value: impl Into<String>) -> Self {
        Self::Validation {
            field,
            value: value.into(),
        }
    }

    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    pub fn unexpected_response(
        url: impl Into<String>,
        status: StatusCode,
        body: impl Into<String>,
    ) -> Self {
        Self::UnexpectedResponse {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    pub fn entity(kind: &'static str, name: impl Into<String>, source: SeedError) -> Self {
        Self::Entity {
            kind,
            name: name.into(),
            source: Box::new(source),
        }
    }
}

/// Outcome of a get-by-id call. A 404 routes the upsert to the create
/// path instead of failing the run.
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

pub fn parse_uuid(field: &'static str, value: &str) -> Result<Uuid, SeedError> {
    Uuid::parse_str(value).map_err(|_| SeedError::invalid_uuid(field, value))
}
