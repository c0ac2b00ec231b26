//! REST API helpers for communicating with the analyzer backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: `HttpBackend` returns
//! `ApiError::Unavailable` since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; nothing here retries. The store
//! layer decides how a failure surfaces (error field + toast).

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "hydrate")]
use serde::de::DeserializeOwned;

use super::types::{ExportFormat, LogSummary, MaintenanceLog, MaintenanceLogData, UploadResponse};
#[cfg(feature = "hydrate")]
use super::types::ExportRequest;

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Errors produced by backend calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, body build).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-2xx status.
    #[error("server responded with status {status}")]
    Status { status: u16 },

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The backend accepted the request but reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// Called outside the browser (SSR or native tests).
    #[error("not available on server")]
    Unavailable,
}

/// An image read once from the picker or drop target, ready to post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The REST surface the store drives.
///
/// `HttpBackend` is the browser implementation; tests substitute fakes.
#[allow(async_fn_in_trait)]
pub trait LogBackend {
    /// `GET /logs/`
    async fn list_logs(&self) -> Result<Vec<LogSummary>, ApiError>;
    /// `GET /logs/{id}`
    async fn get_log(&self, id: &str) -> Result<MaintenanceLog, ApiError>;
    /// `GET /logs/search/{registration}`
    async fn search_logs(&self, registration: &str) -> Result<Vec<LogSummary>, ApiError>;
    /// `POST /upload-log/` as multipart with field `file`.
    async fn upload_log(&self, file: &UploadFile) -> Result<UploadResponse, ApiError>;
    /// `PUT /logs/{id}` with the full document.
    async fn update_log(&self, id: &str, data: &MaintenanceLogData) -> Result<MaintenanceLog, ApiError>;
    /// `DELETE /logs/{id}`
    async fn delete_log(&self, id: &str) -> Result<(), ApiError>;
    /// `POST /logs/{id}/export`, returning the rendered bytes.
    async fn export_log(&self, id: &str, format: ExportFormat) -> Result<Vec<u8>, ApiError>;
}

/// `gloo-net` implementation of [`LogBackend`] rooted at a base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpBackend {
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

/// Percent-encode one URL path segment (RFC 3986 unreserved set kept).
pub fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

pub fn logs_endpoint(base: &str) -> String {
    format!("{base}/logs/")
}

pub fn log_endpoint(base: &str, id: &str) -> String {
    format!("{base}/logs/{}", encode_path_segment(id))
}

pub fn search_endpoint(base: &str, registration: &str) -> String {
    format!("{base}/logs/search/{}", encode_path_segment(registration))
}

pub fn upload_endpoint(base: &str) -> String {
    format!("{base}/upload-log/")
}

pub fn export_endpoint(base: &str, id: &str) -> String {
    format!("{base}/logs/{}/export", encode_path_segment(id))
}

/// URL of the stored source image for a record.
pub fn image_url(base: &str, filename: &str) -> String {
    format!("{base}/images/{}", encode_path_segment(filename))
}

#[cfg(feature = "hydrate")]
fn request_error(err: &gloo_net::Error) -> ApiError {
    ApiError::Request(err.to_string())
}

#[cfg(feature = "hydrate")]
fn js_error(err: &wasm_bindgen::JsValue) -> ApiError {
    ApiError::Request(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

#[cfg(feature = "hydrate")]
fn ensure_ok(resp: &gloo_net::http::Response) -> Result<(), ApiError> {
    if resp.ok() { Ok(()) } else { Err(ApiError::Status { status: resp.status() }) }
}

#[cfg(feature = "hydrate")]
async fn read_json<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    ensure_ok(&resp)?;
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
fn multipart_body(file: &UploadFile) -> Result<web_sys::FormData, ApiError> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&file.content_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(|e| js_error(&e))?;
    let form = web_sys::FormData::new().map_err(|e| js_error(&e))?;
    form.append_with_blob_and_filename("file", &blob, &file.name)
        .map_err(|e| js_error(&e))?;
    Ok(form)
}

impl LogBackend for HttpBackend {
    async fn list_logs(&self) -> Result<Vec<LogSummary>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&logs_endpoint(&self.base_url))
                .send()
                .await
                .map_err(|e| request_error(&e))?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(ApiError::Unavailable)
        }
    }

    async fn get_log(&self, id: &str) -> Result<MaintenanceLog, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&log_endpoint(&self.base_url, id))
                .send()
                .await
                .map_err(|e| request_error(&e))?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(ApiError::Unavailable)
        }
    }

    async fn search_logs(&self, registration: &str) -> Result<Vec<LogSummary>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(&search_endpoint(&self.base_url, registration))
                .send()
                .await
                .map_err(|e| request_error(&e))?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = registration;
            Err(ApiError::Unavailable)
        }
    }

    async fn upload_log(&self, file: &UploadFile) -> Result<UploadResponse, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let form = multipart_body(file)?;
            let resp = gloo_net::http::Request::post(&upload_endpoint(&self.base_url))
                .body(form)
                .map_err(|e| request_error(&e))?
                .send()
                .await
                .map_err(|e| request_error(&e))?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = file;
            Err(ApiError::Unavailable)
        }
    }

    async fn update_log(&self, id: &str, data: &MaintenanceLogData) -> Result<MaintenanceLog, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::put(&log_endpoint(&self.base_url, id))
                .json(data)
                .map_err(|e| request_error(&e))?
                .send()
                .await
                .map_err(|e| request_error(&e))?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, data);
            Err(ApiError::Unavailable)
        }
    }

    async fn delete_log(&self, id: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::delete(&log_endpoint(&self.base_url, id))
                .send()
                .await
                .map_err(|e| request_error(&e))?;
            ensure_ok(&resp)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
            Err(ApiError::Unavailable)
        }
    }

    async fn export_log(&self, id: &str, format: ExportFormat) -> Result<Vec<u8>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = ExportRequest { format, log_id: id.to_owned() };
            let resp = gloo_net::http::Request::post(&export_endpoint(&self.base_url, id))
                .json(&payload)
                .map_err(|e| request_error(&e))?
                .send()
                .await
                .map_err(|e| request_error(&e))?;
            ensure_ok(&resp)?;
            resp.binary().await.map_err(|e| ApiError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, format);
            Err(ApiError::Unavailable)
        }
    }
}
