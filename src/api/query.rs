//! Query filters sent to the maintenance and server listing endpoints
//!
//! Both endpoints take the whole filter as one JSON document in the query
//! string. Field names and order follow the API.

use serde::Serialize;

use crate::utils::error::FetchError;
use crate::utils::escape_query;

/// Maximum rows the API returns in one page
pub const PAGE_COUNT: u64 = 1000;

/// Maintenance search type covering maintenances related to the caller's resources
pub const SEARCH_TYPE_RELATED: &str = "related";

/// Columns requested from the server listing
pub const SERVER_INCLUDE_FIELDS: [&str; 5] = [
    "Name",
    "HostName",
    "Instance.Server.ID",
    "Instance.Host.Name",
    "Instance.Host.InfoURL",
];

/// Sort order of the server listing
pub const SERVER_SORT: [&str; 1] = ["Server.ID"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenancesQuery<'a> {
    #[serde(rename = "Filter")]
    pub filter: MaintenancesFilter<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenancesFilter<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    pub start_at: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub end_at: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub search_type: &'a str,
    pub page_count: u64,
}

impl<'a> MaintenancesQuery<'a> {
    /// Related maintenances in the given date range, one full page
    pub fn related(start_at: &'a str, end_at: &'a str) -> Self {
        Self {
            filter: MaintenancesFilter {
                start_at,
                end_at,
                search_type: SEARCH_TYPE_RELATED,
                page_count: PAGE_COUNT,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServersQuery<'a> {
    #[serde(rename = "Count")]
    pub count: u64,
    #[serde(rename = "Filter")]
    pub filter: ServersFilter<'a>,
    #[serde(rename = "Include")]
    pub include: &'a [&'a str],
    #[serde(rename = "Sort")]
    pub sort: &'a [&'a str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServersFilter<'a> {
    #[serde(rename = "Instance.Host.InfoURL")]
    pub instance_host_info_urls: &'a [&'a str],
}

impl<'a> ServersQuery<'a> {
    /// Servers hosted on machines with any of the given maintenance info URLs
    pub fn on_hosts(info_urls: &'a [&'a str]) -> Self {
        Self {
            count: PAGE_COUNT,
            filter: ServersFilter {
                instance_host_info_urls: info_urls,
            },
            include: &SERVER_INCLUDE_FIELDS,
            sort: &SERVER_SORT,
        }
    }
}

/// JSON-encode a query and escape it as a complete query string
///
/// # Errors
///
/// Returns `FetchError::EncodeQuery` if serialization fails
pub fn encode_query<Q: Serialize>(query: &Q) -> Result<String, FetchError> {
    let json = serde_json::to_string(query).map_err(FetchError::EncodeQuery)?;
    Ok(escape_query(&json))
}
