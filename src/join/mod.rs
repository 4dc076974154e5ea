//! Maintenance/server join
//!
//! Maintenances are grouped by zone, each zone's servers are looked up once,
//! and every server is matched back to its maintenance through the host's
//! info URL. Zones are processed in ascending name order so the report is
//! deterministic.

use crate::api::ServerLookup;
use crate::error::{Error, Result};
use crate::models::{MainteScheduledServer, Maintenances};

/// Join maintenances with the servers they affect
///
/// Rows come out zone by zone in ascending zone order, and in the order the
/// lookup returned servers within a zone.
///
/// # Errors
///
/// Propagates lookup errors, and returns `Error::JoinInconsistency` when a
/// server's host info URL matches none of the fetched maintenances.
pub async fn join_scheduled_servers<L>(
    maintenances: &Maintenances,
    lookup: &L,
) -> Result<Vec<MainteScheduledServer>>
where
    L: ServerLookup + Sync + ?Sized,
{
    let zones = maintenances.info_urls_by_zone();
    let by_info_url = maintenances.by_info_url();

    let mut rows = Vec::new();
    for (zone, info_urls) in &zones {
        tracing::debug!(zone = %zone, maintenances = info_urls.len(), "Looking up servers");
        let servers = lookup.servers_on_hosts(zone, info_urls).await?;

        for server in servers.servers {
            let info_url = &server.instance.host.info_url;
            let mainte = by_info_url.get(info_url.as_str()).ok_or_else(|| {
                Error::JoinInconsistency {
                    zone: zone.to_string(),
                    server_id: server.id.clone(),
                    info_url: info_url.clone(),
                }
            })?;

            rows.push(MainteScheduledServer {
                zone: zone.to_string(),
                mainte_start_at: mainte.start_at.clone(),
                mainte_url: server.instance.host.info_url,
                host_server_name: server.instance.host.name,
                id: server.id,
                name: server.name,
                host_name: server.host_name,
            });
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Maintenance, MaintenancesMeta, Server, ServerHost, ServerInstance, Servers};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn mainte(zone: &str, info_url: &str, start_at: &str) -> Maintenance {
        Maintenance {
            zone: zone.to_string(),
            start_at: start_at.to_string(),
            info_url: info_url.to_string(),
        }
    }

    fn server(id: &str, info_url: &str) -> Server {
        Server {
            id: id.to_string(),
            name: format!("server-{id}"),
            host_name: format!("host-{id}"),
            instance: ServerInstance {
                host: ServerHost {
                    name: format!("sv-{id}"),
                    info_url: info_url.to_string(),
                },
            },
        }
    }

    fn maintenances(items: Vec<Maintenance>) -> Maintenances {
        Maintenances {
            is_ok: true,
            meta: MaintenancesMeta {
                total_pages: 1,
                total_count: items.len() as u64,
            },
            maintenances: items,
        }
    }

    /// Lookup answering from a fixed zone map and recording every call
    #[derive(Default)]
    struct RecordingLookup {
        servers: HashMap<String, Vec<Server>>,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    #[async_trait]
    impl ServerLookup for RecordingLookup {
        async fn servers_on_hosts(&self, zone: &str, info_urls: &[&str]) -> Result<Servers> {
            self.calls.lock().unwrap().push((
                zone.to_string(),
                info_urls.iter().map(|u| u.to_string()).collect(),
            ));
            let servers = self.servers.get(zone).cloned().unwrap_or_default();
            Ok(Servers {
                total: servers.len() as u64,
                count: servers.len() as u64,
                servers,
                ..Servers::default()
            })
        }
    }

    #[tokio::test]
    async fn test_zones_queried_in_sorted_order() {
        let input = maintenances(vec![
            mainte("is1b", "url2", "t2"),
            mainte("is1a", "url1", "t1"),
            mainte("is1b", "url3", "t3"),
        ]);
        let lookup = RecordingLookup::default();

        let rows = join_scheduled_servers(&input, &lookup).await.unwrap();
        assert!(rows.is_empty());

        let calls = lookup.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec![
                ("is1a".to_string(), vec!["url1".to_string()]),
                (
                    "is1b".to_string(),
                    vec!["url2".to_string(), "url3".to_string()]
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_row_carries_maintenance_fields() {
        let input = maintenances(vec![mainte(
            "is1a",
            "https://x/1",
            "2024-01-01T00:00:00+09:00",
        )]);
        let mut lookup = RecordingLookup::default();
        lookup
            .servers
            .insert("is1a".to_string(), vec![server("100", "https://x/1")]);

        let rows = join_scheduled_servers(&input, &lookup).await.unwrap();
        assert_eq!(
            rows,
            vec![MainteScheduledServer {
                zone: "is1a".to_string(),
                id: "100".to_string(),
                name: "server-100".to_string(),
                host_name: "host-100".to_string(),
                host_server_name: "sv-100".to_string(),
                mainte_url: "https://x/1".to_string(),
                mainte_start_at: "2024-01-01T00:00:00+09:00".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_rows_keep_server_order_within_zone() {
        let input = maintenances(vec![
            mainte("tk1a", "u1", "t1"),
            mainte("is1a", "u2", "t2"),
        ]);
        let mut lookup = RecordingLookup::default();
        lookup.servers.insert(
            "tk1a".to_string(),
            vec![server("3", "u1"), server("1", "u1")],
        );
        lookup
            .servers
            .insert("is1a".to_string(), vec![server("2", "u2")]);

        let rows = join_scheduled_servers(&input, &lookup).await.unwrap();
        let ids: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.zone.as_str(), r.id.as_str()))
            .collect();
        assert_eq!(ids, vec![("is1a", "2"), ("tk1a", "3"), ("tk1a", "1")]);
    }

    #[tokio::test]
    async fn test_unknown_info_url_is_inconsistency() {
        let input = maintenances(vec![mainte("is1a", "https://x/1", "t1")]);
        let mut lookup = RecordingLookup::default();
        lookup
            .servers
            .insert("is1a".to_string(), vec![server("7", "https://x/other")]);

        let err = join_scheduled_servers(&input, &lookup).await.unwrap_err();
        match err {
            Error::JoinInconsistency {
                zone,
                server_id,
                info_url,
            } => {
                assert_eq!(zone, "is1a");
                assert_eq!(server_id, "7");
                assert_eq!(info_url, "https://x/other");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_info_url_last_record_wins() {
        let input = maintenances(vec![
            mainte("is1a", "https://x/1", "first"),
            mainte("is1a", "https://x/1", "second"),
        ]);
        let mut lookup = RecordingLookup::default();
        lookup
            .servers
            .insert("is1a".to_string(), vec![server("1", "https://x/1")]);

        let rows = join_scheduled_servers(&input, &lookup).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mainte_start_at, "second");
    }

    #[tokio::test]
    async fn test_no_maintenances_means_no_lookups() {
        let input = maintenances(Vec::new());
        let lookup = RecordingLookup::default();

        let rows = join_scheduled_servers(&input, &lookup).await.unwrap();
        assert!(rows.is_empty());
        assert!(lookup.calls.lock().unwrap().is_empty());
    }
}
