// Core data structures for the maintenance and server APIs and the report

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Paging metadata of the maintenance listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenancesMeta {
    #[serde(default)]
    pub total_pages: u64,
    pub total_count: u64,
}

/// One scheduled host maintenance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintenance {
    pub zone: String,
    pub start_at: String,
    pub info_url: String,
}

/// Response body of `GET /api/global/1.0/maintenances`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintenances {
    #[serde(default)]
    pub is_ok: bool,
    pub meta: MaintenancesMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub maintenances: Vec<Maintenance>,
}

impl Maintenances {
    /// Group info URLs by zone, zones in ascending order
    pub fn info_urls_by_zone(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut zones: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for mainte in &self.maintenances {
            zones
                .entry(mainte.zone.as_str())
                .or_default()
                .push(mainte.info_url.as_str());
        }
        zones
    }

    /// Index maintenances by info URL
    ///
    /// A duplicated URL keeps the last record.
    pub fn by_info_url(&self) -> HashMap<&str, &Maintenance> {
        self.maintenances
            .iter()
            .map(|mainte| (mainte.info_url.as_str(), mainte))
            .collect()
    }
}

/// Host a server instance is running on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerHost {
    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "InfoURL")]
    pub info_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInstance {
    #[serde(rename = "Host")]
    pub host: ServerHost,
}

/// A server as returned by the zone server listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "HostName", default, deserialize_with = "null_as_default")]
    pub host_name: String,
    #[serde(rename = "Instance")]
    pub instance: ServerInstance,
}

/// Response body of `GET /zone/{zone}/api/cloud/1.1/server`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Servers {
    #[serde(rename = "From", default)]
    pub from: u64,
    #[serde(rename = "Count", default)]
    pub count: u64,
    #[serde(rename = "Total")]
    pub total: u64,
    #[serde(rename = "Servers", deserialize_with = "null_as_default")]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub is_ok: bool,
    #[serde(rename = "_log_url", default)]
    pub log_url: String,
}

/// One report row: a server joined with the maintenance of its host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainteScheduledServer {
    #[serde(rename = "Zone")]
    pub zone: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "HostName")]
    pub host_name: String,
    #[serde(rename = "HostServerName")]
    pub host_server_name: String,
    #[serde(rename = "MainteURL")]
    pub mainte_url: String,
    #[serde(rename = "MainteStartAt")]
    pub mainte_start_at: String,
}

impl MainteScheduledServer {
    /// Column labels, in CSV/TSV/LTSV order
    pub const COLUMNS: [&'static str; 7] = [
        "Zone",
        "ID",
        "Name",
        "HostName",
        "MainteStartAt",
        "HostServerName",
        "MainteURL",
    ];

    /// Field values in [`Self::COLUMNS`] order
    pub fn values(&self) -> [&str; 7] {
        [
            self.zone.as_str(),
            self.id.as_str(),
            self.name.as_str(),
            self.host_name.as_str(),
            self.mainte_start_at.as_str(),
            self.host_server_name.as_str(),
            self.mainte_url.as_str(),
        ]
    }
}

// The API sends `null` for unset strings and empty lists
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
