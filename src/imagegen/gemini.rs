//! Gemini `generateContent` backend over blocking HTTP

use super::{Credential, GenerateResponse, ImageBackend};
use crate::{Error, GeneratorConfig, Result};
use reqwest::blocking::Client;
use serde_json::json;
use std::time::Duration;
use url::Url;

/// Blocking client for the Gemini REST API.
///
/// Each call is one `POST {endpoint}/v1beta/models/{model}:generateContent`
/// with the key in the `x-goog-api-key` header. Timeouts come from
/// [`GeneratorConfig::timeout_ms`]; nothing is retried.
pub struct GeminiClient {
    client: Client,
    url: Url,
    credential: Credential,
    user_agent: String,
}

impl GeminiClient {
    pub fn new(config: &GeneratorConfig, credential: Credential) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: generate_url(&config.endpoint, &config.model)?,
            credential,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Full request URL
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl ImageBackend for GeminiClient {
    fn generate(&mut self, prompt: &str) -> Result<GenerateResponse> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let res = self
            .client
            .post(self.url.clone())
            .header("x-goog-api-key", self.credential.key())
            .header("User-Agent", self.user_agent.clone())
            .json(&body)
            .send()?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            return Err(Error::Service {
                status: status.as_u16(),
                body,
            });
        }

        Ok(res.json::<GenerateResponse>()?)
    }
}

fn generate_url(endpoint: &str, model: &str) -> Result<Url> {
    if model.trim().is_empty() {
        return Err(Error::ConfigError("model identifier is empty".into()));
    }
    let method = format!("{}:generateContent", model.trim());
    let mut url = Url::parse(endpoint)
        .map_err(|e| Error::ConfigError(format!("invalid endpoint {:?}: {}", endpoint, e)))?;
    url.path_segments_mut()
        .map_err(|_| Error::ConfigError(format!("endpoint {:?} cannot be a base URL", endpoint)))?
        .pop_if_empty()
        .extend(["v1beta", "models", method.as_str()]);
    Ok(url)
}
