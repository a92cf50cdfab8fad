//! Docker manager - main interface for station container operations

#![allow(deprecated)]

use super::network;
use super::station::{StationConfig, STATION_PORT};
use crate::error::{ManagerError, Result};
use bollard::container::{Config, CreateContainerOptions, StartContainerOptions};
use bollard::models::{HostConfig, PortBinding};
use bollard::Docker;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Per-name async locks serializing the check-then-create sequence, so
/// two first-requests for the same name can't both observe "absent".
///
/// An entry is dropped when its last holder releases it; every clone of
/// an entry's Arc goes through the map mutex, so the strong count seen
/// under that mutex is exact.
struct NetworkLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl NetworkLocks {
    fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    async fn acquire(&self, name: &str) -> Arc<Mutex<()>> {
        let mut inner = self.inner.lock().await;
        inner
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn release(&self, name: &str, lock: Arc<Mutex<()>>) {
        drop(lock);
        let mut inner = self.inner.lock().await;
        if let Some(entry) = inner.get(name) {
            if Arc::strong_count(entry) == 1 {
                inner.remove(name);
            }
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

/// Main Docker manager for station operations
pub struct DockerManager {
    docker: Docker,
    ensure_locks: NetworkLocks,
}

impl DockerManager {
    /// Create a new DockerManager
    pub async fn new() -> Result<Self> {
        let docker = Docker::connect_with_socket_defaults()
            .map_err(|e| ManagerError::Network(e.to_string()))?;

        // Verify connection
        docker
            .ping()
            .await
            .map_err(|e| ManagerError::Network(format!("Failed to connect to Docker: {}", e)))?;

        info!("Connected to Docker daemon");

        Ok(Self {
            docker,
            ensure_locks: NetworkLocks::new(),
        })
    }

    /// Ensure a bridge network of this name exists
    pub async fn ensure_network(&self, name: &str) -> Result<()> {
        let lock = self.ensure_locks.acquire(name).await;
        let result = {
            let _guard = lock.lock().await;
            network::ensure_network(&self.docker, name).await
        };
        self.ensure_locks.release(name, lock).await;
        result
    }

    /// Create and start a station container, returning its engine id.
    ///
    /// No resource limits, restart policy, or health check are set; a
    /// station is fire-and-forget once started.
    pub async fn provision_station(&self, station: &StationConfig) -> Result<String> {
        debug!("Creating station container: {}", station.name);

        let port_key = format!("{}/tcp", STATION_PORT);

        let host_config = HostConfig {
            network_mode: Some(station.network.clone()),
            // Engine-assigned ephemeral host port
            port_bindings: Some(HashMap::from([(
                port_key.clone(),
                Some(vec![PortBinding {
                    host_ip: None,
                    host_port: None,
                }]),
            )])),
            ..Default::default()
        };

        let config = Config {
            image: Some(station.image.clone()),
            env: Some(station.env_vec()),
            exposed_ports: Some(HashMap::from([(port_key, HashMap::new())])),
            host_config: Some(host_config),
            ..Default::default()
        };

        let options = CreateContainerOptions {
            name: &station.name,
            platform: None,
        };

        let response = self
            .docker
            .create_container(Some(options), config)
            .await
            .map_err(|e| ManagerError::Container(e.to_string()))?;

        debug!(
            "Created station container {} with id {}",
            station.name, response.id
        );

        self.docker
            .start_container(&station.name, None::<StartContainerOptions<String>>)
            .await
            .map_err(|e| ManagerError::Container(e.to_string()))?;

        info!("Started station container: {}", station.name);

        Ok(response.id)
    }

    /// Report whether a container is a member of a network
    pub async fn verify_attachment(&self, network_name: &str, container_id: &str) -> Result<bool> {
        network::is_attached(&self.docker, network_name, container_id).await
    }
}

impl std::fmt::Debug for DockerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockerManager").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_network_locks_pruned_after_release() {
        let locks = NetworkLocks::new();

        let lock = locks.acquire("net-a").await;
        assert_eq!(locks.len().await, 1);

        locks.release("net-a", lock).await;
        assert_eq!(locks.len().await, 0);
    }

    #[tokio::test]
    async fn test_network_locks_shared_per_name() {
        let locks = NetworkLocks::new();

        let first = locks.acquire("net-a").await;
        let second = locks.acquire("net-a").await;
        assert!(Arc::ptr_eq(&first, &second));

        let other = locks.acquire("net-b").await;
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(locks.len().await, 2);

        // Entry survives until the last holder releases it
        locks.release("net-a", first).await;
        assert_eq!(locks.len().await, 2);
        locks.release("net-a", second).await;
        assert_eq!(locks.len().await, 1);

        locks.release("net-b", other).await;
        assert_eq!(locks.len().await, 0);
    }
}
