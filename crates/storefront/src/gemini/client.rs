//! Generative Language API client.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use ragvynn_core::ImagePayload;

use crate::config::GeminiConfig;

use super::error::{ApiErrorResponse, GeminiError};
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig,
};
use super::{GenerativeModel, ImagePrompt, TextPrompt};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Generative Language API client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct GeminiClient {
    inner: Arc<GeminiClientInner>,
}

struct GeminiClientInner {
    client: reqwest::Client,
    api_base: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::Config` if the API key contains invalid header
    /// characters or the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|_| GeminiError::Config("API key is not a valid header value".to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(API_KEY_HEADER, api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GeminiError::Config(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(GeminiClientInner {
                client,
                api_base: config.api_base_url.as_str().trim_end_matches('/').to_string(),
                text_model: config.text_model.clone(),
                image_model: config.image_model.clone(),
            }),
        })
    }

    /// Call `generateContent` on `model`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API returns an error
    /// status, or the body cannot be parsed.
    #[instrument(skip(self, request))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = endpoint(&self.inner.api_base, model);
        let response = self.inner.client.post(url).json(request).send().await?;

        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| GeminiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(handle_error_status(status, response).await)
        }
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    #[instrument(skip(self, request), fields(model = %self.inner.text_model))]
    async fn generate_text(&self, request: TextPrompt) -> Result<String, GeminiError> {
        let body = GenerateContentRequest {
            contents: vec![Content::user_text(request.prompt)],
            system_instruction: Some(Content::instruction(request.system_instruction)),
            generation_config: Some(GenerationConfig {
                temperature: Some(request.temperature),
                ..GenerationConfig::default()
            }),
        };

        let response = self.generate_content(&self.inner.text_model, &body).await?;
        if let Some(reason) = response.block_reason() {
            return Err(GeminiError::Blocked(reason.to_string()));
        }
        Ok(response.text())
    }

    #[instrument(skip(self, request), fields(model = %self.inner.image_model))]
    async fn generate_image(
        &self,
        request: ImagePrompt,
    ) -> Result<Option<ImagePayload>, GeminiError> {
        let body = image_request(request);
        let response = self.generate_content(&self.inner.image_model, &body).await?;
        if let Some(reason) = response.block_reason() {
            return Err(GeminiError::Blocked(reason.to_string()));
        }

        response
            .first_inline_data()
            .map(|inline| {
                let bytes = STANDARD
                    .decode(inline.data.as_bytes())
                    .map_err(|e| GeminiError::Parse(format!("Invalid image data: {e}")))?;
                Ok(ImagePayload {
                    mime_type: inline.mime_type.clone(),
                    bytes,
                })
            })
            .transpose()
    }
}

/// Build the `generateContent` URL for `model`.
/// Image generation asks for image output only.
fn image_request(request: ImagePrompt) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user_text(request.prompt)],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["IMAGE".to_string()]),
            image_config: Some(ImageConfig {
                aspect_ratio: request.aspect_ratio,
            }),
            ..GenerationConfig::default()
        }),
    }
}

fn endpoint(api_base: &str, model: &str) -> String {
    format!("{api_base}/models/{model}:generateContent")
}

/// Map an error status to a `GeminiError`.
async fn handle_error_status(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> GeminiError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return GeminiError::RateLimited(retry_after);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return GeminiError::Unauthorized("Invalid API key".to_string());
    }

    match response.text().await {
        Ok(body) => match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_error) => GeminiError::Api {
                code: api_error.error.code,
                status: api_error.error.status,
                message: api_error.error.message,
            },
            Err(_) => GeminiError::Api {
                code: status.as_u16(),
                status: status.canonical_reason().unwrap_or("unknown").to_string(),
                message: body,
            },
        },
        Err(e) => GeminiError::Http(e),
    }
}
