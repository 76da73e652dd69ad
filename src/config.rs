//! Coordinator configuration, plus an optional TOML-file loader behind
//! the `toml-config` feature.

use crate::domain::ban_list::DEFAULT_BAN_DURATION_MS;
use crate::domain::routing_table::DEFAULT_K;

#[cfg_attr(feature = "toml-config", derive(serde::Deserialize))]
#[cfg_attr(feature = "toml-config", serde(default))]
#[derive(Debug, Clone)]
pub struct DptConfig {
    pub should_find_neighbours: bool,
    pub should_get_dns_peers: bool,
    pub dns_refresh_quantity: usize,
    pub dns_networks: Vec<String>,
    pub dns_addr: String,
    pub refresh_interval_ms: u64,
    pub timeout_ms: u64,
    pub ban_duration_ms: u64,
    pub bucket_size: usize,
}

impl Default for DptConfig {
    fn default() -> Self {
        Self {
            should_find_neighbours: true,
            should_get_dns_peers: false,
            dns_refresh_quantity: 25,
            dns_networks: Vec::new(),
            dns_addr: "8.8.8.8".to_string(),
            refresh_interval_ms: 60_000,
            timeout_ms: 10_000,
            ban_duration_ms: DEFAULT_BAN_DURATION_MS,
            bucket_size: DEFAULT_K,
        }
    }
}

impl DptConfig {
    /// The coordinator divides the configured refresh interval into ten
    /// slots so that, over a full cycle, every peer is probed once
    /// (selected by `id[0] mod 10`).
    pub fn refresh_tick_interval_ms(&self) -> u64 {
        self.refresh_interval_ms / 10
    }

    /// DNS ingest requests half the configured quantity per refresh tick.
    pub fn dns_peers_per_tick(&self) -> usize {
        self.dns_refresh_quantity / 2
    }
}

#[cfg(feature = "toml-config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(feature = "toml-config")]
pub fn load_from_toml_file(path: &std::path::Path) -> Result<DptConfig, ConfigLoadError> {
    let contents = std::fs::read_to_string(path)?;
    let config: DptConfig = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_interval_divides_into_ten_slots() {
        let config = DptConfig::default();
        assert_eq!(config.refresh_tick_interval_ms(), 6_000);
    }

    #[test]
    fn dns_quantity_halves_per_tick() {
        let config = DptConfig {
            dns_refresh_quantity: 25,
            ..Default::default()
        };
        assert_eq!(config.dns_peers_per_tick(), 12);
    }
}
