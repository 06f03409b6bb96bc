use crate::errors::{Result, SlidesApiError};
use crate::models::presentation::Presentation;
use crate::models::requests::{BatchUpdateRequest, BatchUpdateResponse, Request};
use log::{debug, error};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[cfg(not(target_arch = "wasm32"))]
#[cfg(feature = "yup-oauth2")]
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

const SLIDES_API: &str = "https://slides.googleapis.com/v1/presentations";
const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";

/// Scopes needed to read, create, copy and edit decks.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/presentations",
    "https://www.googleapis.com/auth/drive",
];

/// Helper struct to attempt parsing standard Google API error responses.
#[derive(Deserialize, Debug)]
struct GoogleApiErrorResponse {
    error: GoogleApiErrorDetail,
}

/// Details within a standard Google API error response.
#[allow(unused)]
#[derive(Deserialize, Debug)]
struct GoogleApiErrorDetail {
    code: i32,
    message: String,
    status: String,
}

/// The file resource returned by `files.copy`; only the id is read.
#[derive(Deserialize, Debug)]
struct DriveFile {
    id: String,
}

/// The remote operations a conversion run needs.
#[allow(async_fn_in_trait)]
pub trait PresentationService {
    async fn get_presentation(&self, presentation_id: &str) -> Result<Presentation>;

    async fn create_presentation(&self, title: &str) -> Result<Presentation>;

    /// Copies `source_id` (a theme deck) into a new presentation. Returns the
    /// new presentation id.
    async fn copy_presentation(&self, source_id: &str, title: &str) -> Result<String>;

    async fn batch_update(
        &self,
        presentation_id: &str,
        requests: &[Request],
    ) -> Result<BatchUpdateResponse>;
}

/// Slides and Drive REST client authorized with a bearer token.
#[derive(Debug, Clone)]
pub struct SlidesClient {
    http: reqwest::Client,
    access_token: String,
}

impl SlidesClient {
    /// Uses an access token obtained elsewhere.
    pub fn with_token(http: reqwest::Client, access_token: impl Into<String>) -> Self {
        SlidesClient {
            http,
            access_token: access_token.into(),
        }
    }

    /// Authorizes with the service account key named by the
    /// `GOOGLE_APPLICATION_CREDENTIALS` environment variable. Ensure
    /// `dotenvy::dotenv().ok();` has been called beforehand if the variable
    /// lives in a `.env` file.
    #[cfg(not(target_arch = "wasm32"))]
    #[cfg(feature = "yup-oauth2")]
    pub async fn from_service_account(http: reqwest::Client) -> Result<Self> {
        let key_file_path = std::env::var("GOOGLE_APPLICATION_CREDENTIALS")?;
        let sa_key = read_service_account_key(std::path::Path::new(&key_file_path))
            .await
            .map_err(|e| {
                SlidesApiError::AuthSetupError(format!(
                    "Failed to read service account key from '{}': {}",
                    key_file_path, e
                ))
            })?;
        let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;
        let token = auth.token(SCOPES).await?;
        let access_token = token.token().ok_or_else(|| {
            SlidesApiError::AuthSetupError("OAuth token response carried no access token".to_string())
        })?;
        Ok(Self::with_token(http, access_token))
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(SlidesApiError::Network)?;

        let status = response.status();
        if status.is_success() {
            let bytes = response.bytes().await.map_err(SlidesApiError::Network)?;
            serde_json::from_slice::<T>(&bytes).map_err(|e| {
                let json_snippet = String::from_utf8_lossy(&bytes[..bytes.len().min(500)]);
                error!("JSON deserialization error: {e}\nFailing JSON snippet:\n{json_snippet}");
                SlidesApiError::JsonDeserialization(e)
            })
        } else {
            // Handle API-level errors (non-2xx status codes)
            let error_text = response.text().await.map_err(SlidesApiError::Network)?;
            let message = match serde_json::from_str::<GoogleApiErrorResponse>(&error_text) {
                Ok(google_error) => google_error.error.message,
                Err(_) => format!("API request failed with status {}: {}", status, error_text),
            };
            Err(SlidesApiError::ApiError { status, message })
        }
    }
}

fn require_id(presentation_id: &str) -> Result<()> {
    if presentation_id.is_empty() {
        return Err(SlidesApiError::InvalidInput(
            "Presentation ID cannot be empty".to_string(),
        ));
    }
    Ok(())
}

impl PresentationService for SlidesClient {
    async fn get_presentation(&self, presentation_id: &str) -> Result<Presentation> {
        require_id(presentation_id)?;
        let api_url = format!("{SLIDES_API}/{presentation_id}");
        self.send(self.http.get(&api_url)).await
    }

    async fn create_presentation(&self, title: &str) -> Result<Presentation> {
        let body = serde_json::json!({ "title": title });
        let presentation: Presentation = self.send(self.http.post(SLIDES_API).json(&body)).await?;
        debug!("Created presentation {}", presentation.presentation_id);
        Ok(presentation)
    }

    async fn copy_presentation(&self, source_id: &str, title: &str) -> Result<String> {
        require_id(source_id)?;
        let api_url = format!("{DRIVE_FILES_API}/{source_id}/copy");
        let body = serde_json::json!({ "name": title });
        let file: DriveFile = self.send(self.http.post(&api_url).json(&body)).await?;
        debug!("Copied {source_id} to {}", file.id);
        Ok(file.id)
    }

    async fn batch_update(
        &self,
        presentation_id: &str,
        requests: &[Request],
    ) -> Result<BatchUpdateResponse> {
        require_id(presentation_id)?;
        let api_url = format!("{SLIDES_API}/{presentation_id}:batchUpdate");
        let body = BatchUpdateRequest { requests };
        debug!("Submitting {} requests to {presentation_id}", requests.len());
        self.send(self.http.post(&api_url).json(&body)).await
    }
}
