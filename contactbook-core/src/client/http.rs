// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP contact service
//!
//! Talks to the contact store's REST endpoints:
//! - `GET /contacts`, `GET /contacts/{id}`
//! - `POST /contacts`
//! - `PATCH /contacts/{id}`
//! - `DELETE /contacts/{id}`

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::error::{ServiceError, ServiceResult};
use super::ContactService;
use crate::config::ClientConfig;
use crate::contact::{Contact, ContactDraft, ContactPatch};

/// Error body sent by the store.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Contact service backed by the REST API.
#[derive(Clone)]
pub struct HttpContactService {
    client: Client,
    base_url: String,
}

impl HttpContactService {
    /// Create a new service from config
    pub fn new(config: &ClientConfig) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(format!(
                "Contactbook/{}",
                option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
            ))
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn contacts_url(&self) -> String {
        format!("{}/contacts", self.base_url)
    }

    /// URL of a single contact, with `id` percent-encoded as one path segment.
    fn contact_url(&self, id: &str) -> ServiceResult<Url> {
        let invalid = || ServiceError::Network(format!("invalid base URL: {}", self.base_url));
        let mut url = Url::parse(&self.contacts_url()).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|_| invalid())?.push(id);
        Ok(url)
    }

    /// Turns a non-success response into a typed error.
    async fn check(response: Response, subject: &str) -> ServiceResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        debug!(status = status.as_u16(), ?message, "contact store returned an error");
        Err(ServiceError::from_status(status.as_u16(), message, subject))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ServiceResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

fn network(e: reqwest::Error) -> ServiceError {
    ServiceError::Network(e.to_string())
}

#[async_trait]
impl ContactService for HttpContactService {
    async fn list(&self) -> ServiceResult<Vec<Contact>> {
        let response = self
            .client
            .get(self.contacts_url())
            .send()
            .await
            .map_err(network)?;
        let response = Self::check(response, "contacts").await?;
        Self::decode(response).await
    }

    async fn get(&self, id: &str) -> ServiceResult<Contact> {
        let response = self
            .client
            .get(self.contact_url(id)?)
            .send()
            .await
            .map_err(network)?;
        let response = Self::check(response, id).await?;
        Self::decode(response).await
    }

    async fn create(&self, draft: &ContactDraft) -> ServiceResult<Contact> {
        let response = self
            .client
            .post(self.contacts_url())
            .json(draft)
            .send()
            .await
            .map_err(network)?;
        let response = Self::check(response, "contacts").await?;
        Self::decode(response).await
    }

    async fn update(&self, id: &str, patch: &ContactPatch) -> ServiceResult<Contact> {
        let response = self
            .client
            .patch(self.contact_url(id)?)
            .json(patch)
            .send()
            .await
            .map_err(network)?;
        let response = Self::check(response, id).await?;
        Self::decode(response).await
    }

    async fn remove(&self, id: &str) -> ServiceResult<()> {
        let response = self
            .client
            .delete(self.contact_url(id)?)
            .send()
            .await
            .map_err(network)?;
        Self::check(response, id).await?;
        Ok(())
    }
}
