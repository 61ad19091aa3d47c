use reqwest::{Client, Response};
use thiserror::Error;
use tracing::debug;
use url::Url;

use shared::{
    domain::ChallengeId,
    protocol::{
        ApproveChallengeRequest, ChallengeDetail, CreateChallengeRequest, LoginRequest,
        RegisterRequest,
    },
};

pub mod forms;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx answer. `body` is the response text for operations that read
    /// it (create, login, register) and empty for those that do not
    /// (approve, delete, fetch) — the asymmetry mirrors the backend contract.
    #[error("server rejected the request with status {status}")]
    Rejected { status: u16, body: String },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid server base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// HTTP client for the admin REST API.
///
/// Each operation issues exactly one request and maps the outcome into
/// [`ClientError`]; retries, caching, and cancellation are deliberately
/// absent. The base URL is injected at construction rather than hard-coded
/// at the call sites.
#[derive(Debug)]
pub struct AdminClient {
    http: Client,
    base_url: Url,
}

impl AdminClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub async fn create_challenge(
        &self,
        request: &CreateChallengeRequest,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.endpoint("/api/admin/challenges/create"))
            .json(request)
            .send()
            .await?;
        debug!(status = response.status().as_u16(), "create_challenge");
        reject_with_body(response).await
    }

    pub async fn fetch_challenge(
        &self,
        challenge_id: ChallengeId,
    ) -> Result<ChallengeDetail, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/challenges/{}", challenge_id.0)))
            .send()
            .await?;
        debug!(
            challenge_id = challenge_id.0,
            status = response.status().as_u16(),
            "fetch_challenge"
        );
        let response = reject_ignoring_body(response)?;
        Ok(response.json().await?)
    }

    pub async fn approve_challenge(
        &self,
        challenge_id: ChallengeId,
        request: &ApproveChallengeRequest,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .put(self.endpoint(&format!("/api/admin/challenges/approve/{}", challenge_id.0)))
            .json(request)
            .send()
            .await?;
        debug!(
            challenge_id = challenge_id.0,
            status = response.status().as_u16(),
            "approve_challenge"
        );
        reject_ignoring_body(response).map(|_| ())
    }

    pub async fn delete_challenge(&self, challenge_id: ChallengeId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/api/admin/challenges/delete/{}", challenge_id.0)))
            .send()
            .await?;
        debug!(
            challenge_id = challenge_id.0,
            status = response.status().as_u16(),
            "delete_challenge"
        );
        reject_ignoring_body(response).map(|_| ())
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.endpoint("/api/auth/login"))
            .json(request)
            .send()
            .await?;
        debug!(status = response.status().as_u16(), "login");
        reject_with_body(response).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.endpoint("/api/auth/register"))
            .json(request)
            .send()
            .await?;
        debug!(status = response.status().as_u16(), "register");
        reject_with_body(response).await
    }
}

/// Success passes through; failure reads the response text so the caller can
/// surface the server's own message.
async fn reject_with_body(response: Response) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Rejected {
        status: status.as_u16(),
        body,
    })
}

/// Failure discards the body: these operations report a static message.
fn reject_ignoring_body(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(ClientError::Rejected {
        status: status.as_u16(),
        body: String::new(),
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
