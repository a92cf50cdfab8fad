//! Docker management module using Bollard

mod manager;
mod network;
pub mod station;

pub use manager::DockerManager;
