//! Configuration for the base station manager
//!
//! Everything is read from the environment exactly once at startup and
//! handed to the router as an owned struct; request handlers never touch
//! the environment.

use std::env;

/// Coordinates of the MySQL instance that spawned station containers
/// connect to. The manager itself does not open this database; the values
/// are forwarded as environment variables into every container it starts.
#[derive(Debug, Clone)]
pub struct MysqlConfig {
    pub host: String,
    pub port: String,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl MysqlConfig {
    /// Load MySQL coordinates from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env_default("MYSQL_HOST", "mysql"),
            port: env_default("MYSQL_PORT", "3306"),
            database: env_default("MYSQL_DB", "basestations"),
            user: env_default("MYSQL_USER", "root"),
            password: env_default("MYSQL_PASSWORD", ""),
        }
    }

    /// JDBC-style datasource URL in the form the station image expects
    pub fn jdbc_url(&self) -> String {
        format!(
            "jdbc:mysql://{}:{}/{}?useSSL=false",
            self.host, self.port, self.database
        )
    }
}

impl Default for MysqlConfig {
    fn default() -> Self {
        Self {
            host: "mysql".to_string(),
            port: "3306".to_string(),
            database: "basestations".to_string(),
            user: "root".to_string(),
            password: String::new(),
        }
    }
}

/// Main configuration for the manager
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Provisioning configuration
    pub station_image: String,
    pub network_name: String,
    pub kafka_broker: String,
    pub mysql: MysqlConfig,

    // Record store for persisted BaseStation rows
    pub database_url: String,
}

impl ManagerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env_default("BSM_HOST", "0.0.0.0"),
            port: env::var("BSM_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            station_image: env_default("BASE_STATION_IMAGE", "base-station:latest"),
            network_name: env_default("DOCKER_NETWORK", "base-station-net"),
            kafka_broker: env_default("KAFKA_BROKER", "kafka:9092"),
            mysql: MysqlConfig::from_env(),

            database_url: env_default("DATABASE_URL", "sqlite://base_stations.db?mode=rwc"),
        }
    }
}

fn env_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
