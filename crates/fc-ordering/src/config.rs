//! Configuration for transaction ordering

use serde::{Deserialize, Serialize};

/// Ordering configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Maximum transactions to sort at once
    pub max_batch_size: usize,
    /// Maximum predecessor edges in one batch (anti-DoS)
    pub max_edge_count: usize,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 10_000,
            max_edge_count: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OrderingConfig::default();
        assert_eq!(config.max_batch_size, 10_000);
        assert_eq!(config.max_edge_count, 100_000);
    }
}
