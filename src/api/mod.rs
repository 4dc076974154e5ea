//! SAKURA Cloud API client
//!
//! Two endpoints are used:
//! - the global maintenance listing, `{base}/api/global/1.0/maintenances`
//! - the per-zone server listing, `{base}/zone/{zone}/api/cloud/1.1/server`
//!
//! Every request is a single authenticated GET carrying its filter as an
//! escaped JSON query string. Nothing is retried or paged.

pub mod query;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Maintenances, Servers};
use crate::profile::Profile;
use crate::utils::error::FetchError;
use query::{encode_query, MaintenancesQuery, ServersQuery, PAGE_COUNT};

/// Longest error body kept in `FetchError::ServerError`
const MAX_ERROR_BODY: usize = 512;

/// Source of servers affected by maintenances in one zone
///
/// The join engine only depends on this trait, so it can run against the
/// real API or an in-memory fixture.
#[async_trait]
pub trait ServerLookup {
    /// Servers in `zone` whose host has any of the given maintenance info URLs
    async fn servers_on_hosts(&self, zone: &str, info_urls: &[&str]) -> Result<Servers>;
}

/// Authenticated client for the maintenance and server endpoints
pub struct SacloudClient {
    /// HTTP client with configured timeout and user agent
    client: Client,

    /// API root without trailing slash
    base_url: String,

    /// Basic-auth credentials
    profile: Profile,
}

impl SacloudClient {
    /// Create a client for the configured API root
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &Config, profile: Profile) -> std::result::Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base().to_string(),
            profile,
        })
    }

    /// Create a client against an explicit API root, for mock servers
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_base_url(base_url: &str, profile: Profile) -> std::result::Result<Self, FetchError> {
        let config = Config {
            api_base_url: base_url.to_string(),
            ..Config::default()
        };
        Self::new(&config, profile)
    }

    /// URL of the maintenance listing for an encoded query
    pub fn maintenances_url(&self, encoded_query: &str) -> String {
        format!("{}/api/global/1.0/maintenances?{encoded_query}", self.base_url)
    }

    /// URL of a zone's server listing for an encoded query
    pub fn servers_url(&self, zone: &str, encoded_query: &str) -> String {
        format!(
            "{}/zone/{zone}/api/cloud/1.1/server?{encoded_query}",
            self.base_url
        )
    }

    /// Fetch related maintenances between `start_at` and `end_at`
    ///
    /// Empty dates leave that side of the range open.
    ///
    /// # Errors
    ///
    /// Returns `Error::Fetch` or `Error::Decode` on transport or body
    /// failures, and `Error::ResultSetTooLarge` when the API reports more
    /// maintenances than one page holds.
    pub async fn fetch_maintenances(&self, start_at: &str, end_at: &str) -> Result<Maintenances> {
        let query = encode_query(&MaintenancesQuery::related(start_at, end_at))?;
        let maintenances: Maintenances = self
            .get_json(&self.maintenances_url(&query), "maintenances")
            .await?;

        tracing::info!(
            total = maintenances.meta.total_count,
            returned = maintenances.maintenances.len(),
            "Fetched maintenances"
        );

        if maintenances.meta.total_count > PAGE_COUNT {
            return Err(Error::ResultSetTooLarge {
                total: maintenances.meta.total_count,
                limit: PAGE_COUNT,
            });
        }

        Ok(maintenances)
    }

    /// Fetch servers in `zone` hosted on machines under maintenance
    ///
    /// A total above one page is logged as a warning and the retrieved page
    /// is returned as is.
    ///
    /// # Errors
    ///
    /// Returns `Error::Fetch` or `Error::Decode` on transport or body failures
    pub async fn fetch_servers(&self, zone: &str, info_urls: &[&str]) -> Result<Servers> {
        let query = encode_query(&ServersQuery::on_hosts(info_urls))?;
        let servers: Servers = self
            .get_json(&self.servers_url(zone, &query), "servers")
            .await?;

        tracing::info!(
            zone = %zone,
            total = servers.total,
            returned = servers.servers.len(),
            "Fetched maintenance-scheduled servers"
        );

        if servers.total > PAGE_COUNT {
            let warning = Error::ResultSetTruncated {
                zone: zone.to_string(),
                total: servers.total,
                limit: PAGE_COUNT,
            };
            tracing::warn!(category = warning.category().as_str(), "{warning}");
        }

        Ok(servers)
    }

    /// Send one authenticated GET and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str, endpoint: &str) -> Result<T> {
        tracing::debug!(endpoint = %endpoint, url = %url, "Sending request");

        let response = self
            .client
            .get(url)
            .basic_auth(
                &self.profile.access_token,
                Some(&self.profile.access_token_secret),
            )
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(classify_send_error)?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            let body: String = text.chars().take(MAX_ERROR_BODY).collect();
            return Err(FetchError::ServerError {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        serde_json::from_slice(&body).map_err(|e| Error::decode(endpoint, e))
    }
}

#[async_trait]
impl ServerLookup for SacloudClient {
    async fn servers_on_hosts(&self, zone: &str, info_urls: &[&str]) -> Result<Servers> {
        self.fetch_servers(zone, info_urls).await
    }
}

fn classify_send_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_builder() {
        FetchError::InvalidUrl(err.to_string())
    } else {
        FetchError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> Profile {
        Profile {
            name: "default".to_string(),
            access_token: "token".to_string(),
            access_token_secret: "secret".to_string(),
        }
    }

    #[test]
    fn test_endpoint_urls() {
        let client = SacloudClient::with_base_url("http://localhost:8080/", test_profile()).unwrap();

        assert_eq!(
            client.maintenances_url("q"),
            "http://localhost:8080/api/global/1.0/maintenances?q"
        );
        assert_eq!(
            client.servers_url("is1a", "q"),
            "http://localhost:8080/zone/is1a/api/cloud/1.1/server?q"
        );
    }

    #[test]
    fn test_client_creation_with_timeout() {
        let config = Config {
            request_timeout_secs: Some(10),
            ..Config::default()
        };
        assert!(SacloudClient::new(&config, test_profile()).is_ok());
    }
}
