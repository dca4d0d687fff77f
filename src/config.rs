//! Book configuration.
//!
//! The price domain is a runtime parameter validated once at construction.
//! Every ladder and store reads its sizing from here.

use tracing::warn;

use crate::error::{BookError, Result};

/// Default exclusive upper bound on prices (ticks).
pub const DEFAULT_MAX_PRICE: u64 = 200_000;

/// Default number of records per pool chunk.
pub const DEFAULT_POOL_CHUNK_SIZE: usize = 100_000;

/// Largest accepted price domain. Bounds the array ladder's slot vector.
pub const MAX_PRICE_DOMAIN: u64 = 1 << 24;

/// Sizing and domain parameters for one order book.
///
/// ## Example
///
/// ```
/// use ladder_book::BookConfig;
///
/// let config = BookConfig::default()
///     .with_max_price(1_000)
///     .with_pool_chunk_size(4_096);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookConfig {
    /// Exclusive upper bound on prices: valid prices are `[0, max_price)`
    pub max_price: u64,

    /// Records allocated per pool chunk
    pub pool_chunk_size: usize,

    /// Expected number of resting orders (pre-sizing hint)
    pub order_capacity: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            max_price: DEFAULT_MAX_PRICE,
            pool_chunk_size: DEFAULT_POOL_CHUNK_SIZE,
            order_capacity: 0,
        }
    }
}

impl BookConfig {
    pub fn with_max_price(mut self, max_price: u64) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn with_pool_chunk_size(mut self, chunk_size: usize) -> Self {
        self.pool_chunk_size = chunk_size;
        self
    }

    pub fn with_order_capacity(mut self, capacity: usize) -> Self {
        self.order_capacity = capacity;
        self
    }

    /// Check the configuration, rejecting empty or oversized domains.
    pub fn validate(&self) -> Result<()> {
        let problem = if self.max_price == 0 {
            Some("max_price must be at least 1".to_string())
        } else if self.max_price > MAX_PRICE_DOMAIN {
            Some(format!(
                "max_price {} exceeds limit {}",
                self.max_price, MAX_PRICE_DOMAIN
            ))
        } else if self.pool_chunk_size == 0 {
            Some("pool_chunk_size must be at least 1".to_string())
        } else {
            None
        };

        match problem {
            Some(msg) => {
                warn!(config = ?self, "rejected book config: {}", msg);
                Err(BookError::InvalidConfig(msg))
            }
            None => Ok(()),
        }
    }

    /// Whether `price` lies inside `[0, max_price)`
    #[inline]
    pub fn contains_price(&self, price: u64) -> bool {
        price < self.max_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BookConfig::default();
        assert_eq!(config.max_price, 200_000);
        assert_eq!(config.pool_chunk_size, 100_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_domain() {
        let config = BookConfig::default().with_max_price(0);
        assert!(matches!(
            config.validate(),
            Err(BookError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_domain() {
        let config = BookConfig::default().with_max_price(MAX_PRICE_DOMAIN + 1);
        assert!(config.validate().is_err());

        let config = BookConfig::default().with_max_price(MAX_PRICE_DOMAIN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_chunk() {
        let config = BookConfig::default().with_pool_chunk_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_contains_price() {
        let config = BookConfig::default().with_max_price(100);
        assert!(config.contains_price(0));
        assert!(config.contains_price(99));
        assert!(!config.contains_price(100));
    }
}
