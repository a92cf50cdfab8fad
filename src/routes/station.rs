//! Base station provisioning endpoint

use super::AppState;
use crate::config::ManagerConfig;
use crate::db::station::{self as db_station, BaseStation};
use crate::docker::station::StationConfig;
use crate::error::{ManagerError, Result};
use axum::extract::State;
use serde::Deserialize;
use sqlx::sqlite::SqlitePool;
use tracing::{info, warn};

/// Request body for provisioning a base station
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBaseStationRequest {
    pub node_id: i64,
    pub network_id: i64,
    /// Falls back to the configured default network when omitted
    #[serde(default)]
    pub network_name: String,
    pub streaming_enabled: bool,
}

/// Substitute the configured default network for an omitted name
fn apply_network_default(req: &mut CreateBaseStationRequest, config: &ManagerConfig) {
    if req.network_name.is_empty() {
        req.network_name = config.network_name.clone();
    }
}

/// Validate a Docker network name
/// Only allows alphanumeric characters, dashes, and underscores
fn validate_network_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ManagerError::BadRequest(
            "Network name cannot be empty".to_string(),
        ));
    }

    if name.len() > 64 {
        return Err(ManagerError::BadRequest(
            "Network name too long (max 64 chars)".to_string(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ManagerError::BadRequest(
            "Network name must contain only alphanumeric characters, dashes, or underscores"
                .to_string(),
        ));
    }

    Ok(())
}

fn validate_request(req: &CreateBaseStationRequest) -> Result<()> {
    if req.node_id < 0 {
        return Err(ManagerError::BadRequest(
            "Node ID must be non-negative".to_string(),
        ));
    }
    validate_network_name(&req.network_name)
}

/// Post-start tail of provisioning: the verification gate, then the
/// record write and the success message.
///
/// An unattached container aborts the request before anything is
/// persisted; the container itself stays running.
async fn finalize_station(
    db: &SqlitePool,
    req: &CreateBaseStationRequest,
    container_id: &str,
    attached: bool,
) -> Result<String> {
    if !attached {
        warn!(
            "Container {} missing from network {} after start",
            container_id, req.network_name
        );
        return Err(ManagerError::Verification(format!(
            "container {} is not a member of network {}",
            container_id, req.network_name
        )));
    }

    let record = BaseStation {
        node_id: req.node_id,
        network_id: req.network_id,
        network_name: req.network_name.clone(),
        streaming_enabled: req.streaming_enabled,
    };
    db_station::save(db, &record).await?;

    info!("Base station {} provisioned", req.node_id);

    Ok(format!(
        "Base Station {} created and started successfully!",
        req.node_id
    ))
}

/// POST /create-base-station - Provision one station container
///
/// Strictly linear: ensure network, create and start the container,
/// verify the attachment, persist the record.
///
/// Note: Accepts JSON regardless of Content-Type header.
pub async fn create_base_station(State(state): State<AppState>, body: String) -> Result<String> {
    let mut req: CreateBaseStationRequest = serde_json::from_str(&body)
        .map_err(|e| ManagerError::BadRequest(format!("Invalid JSON: {}", e)))?;

    apply_network_default(&mut req, &state.config);
    validate_request(&req)?;

    info!(
        "Provisioning base station {} on network {}",
        req.node_id, req.network_name
    );

    state.docker.ensure_network(&req.network_name).await?;

    let station = StationConfig::for_request(&state.config, &req);
    let container_id = state.docker.provision_station(&station).await?;

    let attached = state
        .docker
        .verify_attachment(&req.network_name, &container_id)
        .await?;

    finalize_station(&state.db, &req, &container_id, attached).await
}
