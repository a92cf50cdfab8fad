//! Docker network management

#![allow(deprecated)]

use crate::error::{ManagerError, Result};
use bollard::network::{CreateNetworkOptions, InspectNetworkOptions, ListNetworksOptions};
use bollard::Docker;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Report whether a network with exactly this name exists.
///
/// The engine's `name` filter matches substrings, so the returned list is
/// compared against the requested name exactly.
async fn network_exists(docker: &Docker, name: &str) -> Result<bool> {
    let mut filters = HashMap::new();
    filters.insert("name".to_string(), vec![name.to_string()]);

    let networks = docker
        .list_networks(Some(ListNetworksOptions { filters }))
        .await
        .map_err(|e| ManagerError::Network(e.to_string()))?;

    Ok(networks
        .iter()
        .any(|n| n.name.as_deref() == Some(name)))
}

/// Create a bridge network if a network of this name doesn't exist.
///
/// Callers must hold the per-name lock from `DockerManager` across this
/// call; the listing and the create are two engine round-trips and are
/// only race-free while serialized. `check_duplicate` backstops at the
/// engine level.
pub async fn ensure_network(docker: &Docker, name: &str) -> Result<()> {
    if network_exists(docker, name).await? {
        debug!("Network {} already exists", name);
        return Ok(());
    }

    info!("Creating bridge network: {}", name);
    let options = CreateNetworkOptions {
        name: name.to_string(),
        driver: "bridge".to_string(),
        check_duplicate: true,
        ..Default::default()
    };

    docker.create_network(options).await.map_err(|e| {
        warn!("Failed to create network {}: {}", name, e);
        ManagerError::Network(e.to_string())
    })?;

    info!("Created network: {}", name);
    Ok(())
}

/// Report whether a container id appears in a network's membership map.
///
/// Post-start check only; a negative result aborts the request but the
/// container stays running.
pub async fn is_attached(docker: &Docker, network: &str, container_id: &str) -> Result<bool> {
    let inspected = docker
        .inspect_network(
            network,
            Some(InspectNetworkOptions::<String> {
                verbose: false,
                scope: "local".to_string(),
            }),
        )
        .await
        .map_err(|e| ManagerError::Network(e.to_string()))?;

    Ok(inspected
        .containers
        .map(|members| members.contains_key(container_id))
        .unwrap_or(false))
}
