//! Station container configuration

use crate::config::ManagerConfig;
use crate::routes::station::CreateBaseStationRequest;

/// TCP port every station image listens on. The host side is left to the
/// engine's ephemeral port assignment.
pub const STATION_PORT: u16 = 8080;

/// Configuration for creating a station container
#[derive(Debug, Clone)]
pub struct StationConfig {
    pub name: String,
    pub image: String,
    pub network: String,
    pub env: Vec<(String, String)>,
}

impl StationConfig {
    /// Build the container configuration for one provisioning request.
    ///
    /// The env set mirrors what the station image reads at boot: the Kafka
    /// broker, its datasource coordinates, and the request fields.
    pub fn for_request(config: &ManagerConfig, request: &CreateBaseStationRequest) -> Self {
        let env = vec![
            ("KAFKA_BROKER".to_string(), config.kafka_broker.clone()),
            (
                "SPRING_DATASOURCE_URL".to_string(),
                config.mysql.jdbc_url(),
            ),
            (
                "SPRING_DATASOURCE_USERNAME".to_string(),
                config.mysql.user.clone(),
            ),
            (
                "SPRING_DATASOURCE_PASSWORD".to_string(),
                config.mysql.password.clone(),
            ),
            ("NODE_ID".to_string(), request.node_id.to_string()),
            ("NETWORK_ID".to_string(), request.network_id.to_string()),
            ("NETWORK_NAME".to_string(), request.network_name.clone()),
            (
                "STREAMING_ENABLED".to_string(),
                request.streaming_enabled.to_string(),
            ),
        ];

        Self {
            name: format!("base-station-{}", request.node_id),
            image: config.station_image.clone(),
            network: request.network_name.clone(),
            env,
        }
    }

    /// Convert env pairs to Docker format (KEY=VALUE)
    pub fn env_vec(&self) -> Vec<String> {
        self.env
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MysqlConfig;

    fn test_request() -> CreateBaseStationRequest {
        CreateBaseStationRequest {
            node_id: 7,
            network_id: 3,
            network_name: "net-a".to_string(),
            streaming_enabled: true,
        }
    }

    fn test_config() -> ManagerConfig {
        ManagerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            station_image: "base-station:latest".to_string(),
            network_name: "base-station-net".to_string(),
            kafka_broker: "kafka:9092".to_string(),
            mysql: MysqlConfig::default(),
            database_url: "sqlite::memory:".to_string(),
        }
    }

    #[test]
    fn test_container_name_derived_from_node_id() {
        let station = StationConfig::for_request(&test_config(), &test_request());
        assert_eq!(station.name, "base-station-7");
        assert_eq!(station.image, "base-station:latest");
        assert_eq!(station.network, "net-a");
    }

    #[test]
    fn test_env_contains_all_station_variables() {
        let station = StationConfig::for_request(&test_config(), &test_request());
        let env = station.env_vec();

        assert_eq!(env.len(), 8);
        assert!(env.contains(&"KAFKA_BROKER=kafka:9092".to_string()));
        assert!(env.contains(
            &"SPRING_DATASOURCE_URL=jdbc:mysql://mysql:3306/basestations?useSSL=false"
                .to_string()
        ));
        assert!(env.contains(&"SPRING_DATASOURCE_USERNAME=root".to_string()));
        assert!(env.contains(&"SPRING_DATASOURCE_PASSWORD=".to_string()));
        assert!(env.contains(&"NODE_ID=7".to_string()));
        assert!(env.contains(&"NETWORK_ID=3".to_string()));
        assert!(env.contains(&"NETWORK_NAME=net-a".to_string()));
        assert!(env.contains(&"STREAMING_ENABLED=true".to_string()));
    }
}
