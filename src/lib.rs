//! Base Station Manager
//!
//! An HTTP service that provisions one Docker container per request,
//! attaches it to a named bridge network, verifies the attachment, and
//! persists a record of the provisioned node.

pub mod config;
pub mod db;
pub mod docker;
pub mod error;
pub mod routes;

pub use config::ManagerConfig;
pub use error::{ManagerError, Result};
