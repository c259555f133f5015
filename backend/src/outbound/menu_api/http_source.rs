//! Reqwest-backed menu source adapter.
//!
//! This adapter owns transport details only: the request shape, the time
//! bound, HTTP error mapping and decoding into a validated `MenuResult`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::ErrorBodyDto;
use crate::domain::ports::{MenuSource, MenuSourceError};
use crate::domain::{MenuResult, QrToken};
use crate::outbound::body_preview;

/// Menu source issuing one `GET <endpoint>?token=<token>` per fetch.
///
/// The service credential is attached here, server-side, as both the bearer
/// and the `apikey` header.
pub struct HttpMenuSource {
    client: Client,
    endpoint: Url,
    anon_key: Zeroizing<String>,
    timeout: Duration,
}

impl HttpMenuSource {
    /// Build an adapter whose every request is bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        anon_key: Zeroizing<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            anon_key,
            timeout,
        })
    }

    fn request_url(&self, token: &QrToken) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("token", token.as_str());
        url
    }
}

#[async_trait]
impl MenuSource for HttpMenuSource {
    async fn fetch_menu(&self, token: &QrToken) -> Result<MenuResult, MenuSourceError> {
        let bearer = format!("Bearer {}", self.anon_key.as_str());
        let exchange = async {
            let response = self
                .client
                .get(self.request_url(token))
                .header(reqwest::header::ACCEPT, "application/json")
                .header(reqwest::header::AUTHORIZATION, bearer.as_str())
                .header("apikey", self.anon_key.as_str())
                .send()
                .await
                .map_err(map_transport_error)?;
            let status = response.status();
            let body = response.bytes().await.map_err(map_transport_error)?;
            Ok::<_, MenuSourceError>((status, body))
        };
        // Hard bound over connect, headers and body.
        let (status, body) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| {
                MenuSourceError::timeout(format!("no reply within {} ms", self.timeout.as_millis()))
            })??;

        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_menu(body.as_ref())
    }
}

fn parse_menu(body: &[u8]) -> Result<MenuResult, MenuSourceError> {
    let menu: MenuResult = serde_json::from_slice(body)
        .map_err(|error| MenuSourceError::server(format!("invalid menu payload: {error}")))?;
    menu.validate()
        .map_err(|error| MenuSourceError::server(format!("menu payload rejected: {error}")))?;
    Ok(menu)
}

fn map_transport_error(error: reqwest::Error) -> MenuSourceError {
    if error.is_timeout() {
        MenuSourceError::timeout(error.to_string())
    } else {
        MenuSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MenuSourceError {
    if let Some(code) = serde_json::from_slice::<ErrorBodyDto>(body)
        .ok()
        .and_then(|dto| dto.code())
    {
        return MenuSourceError::rejected(code);
    }
    let body_preview = body_preview(body);
    if body_preview.is_empty() {
        MenuSourceError::server(format!("status {}", status.as_u16()))
    } else {
        MenuSourceError::server(format!("status {}: {}", status.as_u16(), body_preview))
    }
}
