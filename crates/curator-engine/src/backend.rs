use anyhow::{Context, Result};
use curator_contracts::candidates::CandidateRegistry;
use curator_contracts::catalog::CatalogSnapshot;
use curator_contracts::requests::{
    GenerationOutcome, GenerationRequest, ReflectCommand, ReflectOutcome,
};
use curator_contracts::CuratorError;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response as HttpResponse};
use serde_json::Value;

use crate::config::BackendConfig;

pub const CATALOG_PATH: &str = "/api/data";
pub const CANDIDATES_PATH: &str = "/api/images";
pub const GENERATE_PATH: &str = "/api/generate";
pub const REFLECT_PATH: &str = "/api/select-image";

const ERROR_BODY_MAX_CHARS: usize = 512;

/// The four calls the curation session makes. The backend is the only
/// writer of canonical assets; its effects are observed by re-fetching.
pub trait CurationBackend: Send + Sync {
    fn fetch_catalog(&self) -> Result<CatalogSnapshot, CuratorError>;
    fn fetch_candidates(&self) -> Result<CandidateRegistry, CuratorError>;
    fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome, CuratorError>;
    fn reflect(&self, command: &ReflectCommand) -> Result<ReflectOutcome, CuratorError>;
}

pub struct HttpBackend {
    config: BackendConfig,
    http: HttpClient,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .context("failed building HTTP client")?;
        Ok(Self { config, http })
    }

    fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Value, CuratorError> {
        tracing::debug!(endpoint, "sending backend request");
        let response = request
            .send()
            .map_err(|err| transport_error(endpoint, &err))?;
        response_json_or_error(endpoint, response)
    }
}

impl CurationBackend for HttpBackend {
    fn fetch_catalog(&self) -> Result<CatalogSnapshot, CuratorError> {
        let url = self.config.endpoint(CATALOG_PATH);
        let payload = self.send("catalog", self.http.get(&url))?;
        CatalogSnapshot::from_value(&payload)
    }

    fn fetch_candidates(&self) -> Result<CandidateRegistry, CuratorError> {
        let url = self.config.endpoint(CANDIDATES_PATH);
        let payload = self.send("candidates", self.http.get(&url))?;
        CandidateRegistry::from_value(&payload)
    }

    fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome, CuratorError> {
        let url = self.config.endpoint(GENERATE_PATH);
        tracing::info!(
            category = %request.category,
            target_id = %request.target_id,
            size = %request.size,
            "requesting generation"
        );
        let builder = self
            .http
            .post(&url)
            .timeout(self.config.generate_timeout)
            .json(request);
        let payload = self.send("generate", builder)?;
        Ok(GenerationOutcome::from_value(&payload))
    }

    fn reflect(&self, command: &ReflectCommand) -> Result<ReflectOutcome, CuratorError> {
        let url = self.config.endpoint(REFLECT_PATH);
        tracing::info!(
            category = %command.category,
            file = %command.file,
            "requesting reflect"
        );
        let payload = self.send("reflect", self.http.post(&url).json(command))?;
        Ok(ReflectOutcome::from_value(&payload))
    }
}

fn transport_error(endpoint: &str, err: &reqwest::Error) -> CuratorError {
    let message = if err.is_timeout() {
        "timed out".to_string()
    } else if err.is_connect() {
        format!("could not connect: {err}")
    } else {
        err.to_string()
    };
    tracing::warn!(endpoint, error = %err, "backend transport failure");
    CuratorError::Backend {
        endpoint: endpoint.to_string(),
        status: err.status().map(|status| status.as_u16()),
        message,
    }
}

fn response_json_or_error(endpoint: &str, response: HttpResponse) -> Result<Value, CuratorError> {
    let status = response.status();
    let code = status.as_u16();
    let body = response
        .text()
        .map_err(|err| transport_error(endpoint, &err))?;
    if !status.is_success() {
        let message = backend_message(&body)
            .unwrap_or_else(|| fallback_message(code, &body));
        tracing::warn!(endpoint, status = code, %message, "backend returned an error");
        return Err(CuratorError::Backend {
            endpoint: endpoint.to_string(),
            status: Some(code),
            message,
        });
    }
    parse_success_body(endpoint, &body)
}

/// Success bodies may be empty; anything else must be JSON.
pub(crate) fn parse_success_body(endpoint: &str, body: &str) -> Result<Value, CuratorError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|err| {
        CuratorError::InvalidPayload(format!("{endpoint} returned invalid JSON: {err}"))
    })
}

/// The backend's own `message` field, shown to the operator verbatim.
pub(crate) fn backend_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    parsed
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn fallback_message(code: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("request failed ({code})");
    }
    format!(
        "request failed ({code}): {}",
        truncate_text(trimmed, ERROR_BODY_MAX_CHARS)
    )
}

fn truncate_text(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    value.chars().take(max_chars).collect::<String>() + "…"
}
