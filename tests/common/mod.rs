//! Common test utilities

#![allow(dead_code)]

use mainte_servers::profile::Profile;
use serde_json::{json, Value};
use wiremock::Request;

pub const TOKEN: &str = "test-token";
pub const SECRET: &str = "test-secret";

pub const MAINTENANCES_PATH: &str = "/api/global/1.0/maintenances";

/// Path of a zone's server listing
pub fn servers_path(zone: &str) -> String {
    format!("/zone/{zone}/api/cloud/1.1/server")
}

/// Create a profile with the test credentials
pub fn test_profile() -> Profile {
    Profile {
        name: "default".to_string(),
        access_token: TOKEN.to_string(),
        access_token_secret: SECRET.to_string(),
    }
}

/// Maintenance listing body from `(zone, info_url, start_at)` triples
pub fn maintenances_body(items: &[(&str, &str, &str)], total_count: u64) -> Value {
    let maintenances: Vec<Value> = items
        .iter()
        .map(|(zone, info_url, start_at)| {
            json!({
                "zone": zone,
                "info_url": info_url,
                "start_at": start_at,
                "end_at": "2099-01-01T06:00:00+09:00",
                "title": "host maintenance",
            })
        })
        .collect();

    json!({
        "is_ok": true,
        "meta": {"total_pages": 1, "total_count": total_count},
        "maintenances": maintenances,
    })
}

/// Server listing body from `(id, host_server_name, info_url)` triples
pub fn servers_body(items: &[(&str, &str, &str)], total: u64) -> Value {
    let servers: Vec<Value> = items
        .iter()
        .map(|(id, host_server_name, info_url)| {
            json!({
                "ID": id,
                "Name": format!("server-{id}"),
                "HostName": format!("server-{id}.local"),
                "Instance": {
                    "Server": {"ID": id},
                    "Host": {"Name": host_server_name, "InfoURL": info_url},
                },
            })
        })
        .collect();

    json!({
        "From": 0,
        "Count": servers.len(),
        "Total": total,
        "Servers": servers,
        "is_ok": true,
        "_log_url": "/cloud/1.1/log/1",
    })
}

/// Decode the JSON filter carried as the whole query string
pub fn query_json(request: &Request) -> Option<Value> {
    let query = request.url.query()?;
    let (key, value) = url::form_urlencoded::parse(query.as_bytes()).next()?;
    if !value.is_empty() {
        return None;
    }
    serde_json::from_str(&key).ok()
}
