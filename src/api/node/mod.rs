mod api_handler;
pub mod get_version;

use crate::api::{ApiError, VersionApi};
use crate::config::settings::NodeSettings;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";

pub struct ApiNode {
    name: String,
    api_uri: String,
    http_client: reqwest::Client,
}

impl ApiNode {
    pub fn new(node: &NodeSettings) -> Result<Self, ApiError> {
        let origin = Self::origin(&node.url)?;
        let api_uri = format!("{}/api", origin);

        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(node.unsecured_certificate);
        if let Some(connect_timeout) = node.connect_timeout {
            builder = builder.connect_timeout(Duration::from_secs(connect_timeout));
        }
        if let Some(request_timeout) = node.request_timeout {
            builder = builder.timeout(Duration::from_secs(request_timeout));
        }
        let http_client = builder.build()?;

        Ok(Self {
            name: node.name.clone(),
            api_uri,
            http_client,
        })
    }

    /// Scheme, host and port of the configured url. Paths, queries and
    /// fragments are dropped.
    pub fn origin(url: &str) -> Result<String, ApiError> {
        let parsed = Url::parse(url)
            .map_err(|err| ApiError::InvalidOrigin(format!("{}: {}", url, err)))?;
        let origin = parsed.origin();
        if !origin.is_tuple() {
            return Err(ApiError::InvalidOrigin(format!(
                "{}: url has no scheme/host/port origin",
                url
            )));
        }
        Ok(origin.ascii_serialization())
    }

    pub(crate) fn api_uri(&self) -> &str {
        &self.api_uri
    }

    pub fn get(&self, route: &str) -> reqwest::RequestBuilder {
        let api_route = format!("{}{}", self.api_uri, route);

        self.http_client
            .get(&api_route)
            .header(ACCEPT, JSON_CONTENT_TYPE)
    }
}

#[async_trait]
impl VersionApi for ApiNode {
    fn name(&self) -> &str {
        &self.name
    }

    async fn version(&self) -> Result<String, ApiError> {
        get_version::fetch_version(self).await
    }
}
