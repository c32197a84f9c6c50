// API client module: a small blocking HTTP client that talks to the
// stylization endpoint. One multipart POST per Generate, one JSON reply.

use anyhow::Context as _;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::Config;
use crate::error::StylerError;
use crate::file::SelectedFile;
use crate::style::Style;

/// Anything able to turn an image and a style into a stylized image.
/// The session only sees this trait, so tests can swap the network out.
pub trait Stylizer {
    /// Returns the raw bytes of the stylized image.
    fn stylize(&self, file: &SelectedFile, style: Style) -> Result<Vec<u8>, StylerError>;
}

/// Reply body of the stylization endpoint. Either field may be missing;
/// any other shape counts as a generic failure.
#[derive(Deserialize, Debug, Default)]
struct StylizeResponse {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Simple API client that holds a reqwest blocking client and the URL of
/// the stylization endpoint.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    /// Build a client for the endpoint named in `config`. No timeout is
    /// set: the request resolves or fails per the transport's defaults.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(None)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form(file: &SelectedFile, style: Style) -> Result<multipart::Form, StylerError> {
        let part = multipart::Part::bytes(file.bytes().to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime())?;
        Ok(multipart::Form::new()
            .part("file", part)
            .text("style", style.tag()))
    }
}

impl Stylizer for ApiClient {
    fn stylize(&self, file: &SelectedFile, style: Style) -> Result<Vec<u8>, StylerError> {
        log::info!(
            "POST {} ({} bytes, style {})",
            self.endpoint,
            file.len(),
            style
        );
        let res = self
            .client
            .post(&self.endpoint)
            .multipart(Self::form(file, style)?)
            .send()?;
        let status = res.status();
        let body = res.text()?;
        log::debug!("response {status}, {} bytes", body.len());
        interpret_response(status, &body)
    }
}

/// Turn a status and raw body into image bytes or the error to show.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<Vec<u8>, StylerError> {
    let parsed: StylizeResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) => {
            log::warn!("unparseable response ({status}): {err}");
            return Err(StylerError::generic());
        }
    };

    if status.is_success() {
        if let Some(image) = parsed.image {
            return decode_payload(&image);
        }
    }
    match parsed.error {
        Some(msg) if !msg.trim().is_empty() => Err(StylerError::Service(msg)),
        _ => Err(StylerError::generic()),
    }
}

/// Decode a base64 image, accepting a bare string or a `data:` URL.
fn decode_payload(image: &str) -> Result<Vec<u8>, StylerError> {
    let b64 = match image.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => image,
    };
    // The service may wrap long base64 lines.
    let cleaned: String = b64.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|_| StylerError::Transport("Received a malformed image payload.".into()))
}
