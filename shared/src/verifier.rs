//! Remote identity verification.
//!
//! The client proves control of an email address with an assertion token;
//! we forward it together with our own public origin (the audience) to the
//! verification endpoint and trust its answer.

use std::time::Duration;

use crate::{error::AppError, types::VerifierResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct IdentityVerifier {
    client: reqwest::Client,
    url: String,
}

impl IdentityVerifier {
    pub fn new(url: &str) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Confirms `assertion` with the remote verifier.
    ///
    /// A reachable verifier that rejects the assertion (status other than
    /// "okay", or no email) is an authentication failure; a network or
    /// parse failure is an infrastructure failure, never silently treated
    /// as a rejection.
    pub async fn verify(
        &self,
        assertion: &str,
        audience: &str,
    ) -> Result<VerifierResponse, AppError> {
        let response: VerifierResponse = self
            .client
            .post(&self.url)
            .form(&[("assertion", assertion), ("audience", audience)])
            .send()
            .await?
            .json()
            .await?;

        accept(response)
    }
}

fn accept(response: VerifierResponse) -> Result<VerifierResponse, AppError> {
    if response.okay() {
        Ok(response)
    } else {
        tracing::warn!(status = %response.status, "identity verification rejected");
        Err(AppError::Authentication)
    }
}
