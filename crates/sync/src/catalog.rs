// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Fieldwork Contributors

//! Remote catalog service.
//!
//! The engine only needs two calls from the server: the catalog of
//! available forms, and one form's schema and data. [`CatalogService`]
//! is that seam; [`HttpCatalog`] is the production implementation.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::SyncConfig;
use fw_core::{CatalogEntry, Error, FormPayload, FormRef, Result};

/// The remote calls the sync engine depends on.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetches the server's catalog of available forms.
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>>;

    /// Fetches one form's schema and data.
    async fn fetch_form(&self, table_name: &str, reference: &FormRef) -> Result<FormPayload>;
}

/// HTTP implementation of the catalog service.
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Builds a client for the configured server.
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| Error::transport(None, e.to_string()))?;
        Ok(HttpCatalog {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    /// URL of the form catalog endpoint.
    fn catalog_url(&self) -> String {
        format!("{}/default/index/mforms", self.base_url)
    }

    /// URL of a single form endpoint.
    fn form_url(&self, reference: &FormRef) -> String {
        format!(
            "{}/{}/{}/mform",
            self.base_url, reference.controller, reference.function
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::transport(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body
            };
            return Err(Error::transport(Some(status.as_u16()), message));
        }

        response
            .json()
            .await
            .map_err(|e| Error::transport(Some(status.as_u16()), e.to_string()))
    }
}

#[async_trait]
impl CatalogService for HttpCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>> {
        tracing::debug!("fetching form catalog from {}", self.catalog_url());
        self.get_json(&self.catalog_url(), &[]).await
    }

    async fn fetch_form(&self, table_name: &str, reference: &FormRef) -> Result<FormPayload> {
        let url = self.form_url(reference);
        let mut query: Vec<(&str, &str)> = reference
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        if !reference.params.contains_key("t") {
            query.push(("t", table_name));
        }
        tracing::debug!(table = table_name, "fetching form from {url}");
        self.get_json(&url, &query).await
    }
}
