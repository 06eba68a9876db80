//! Runtime configuration, read from the environment.

use crate::clients::DEFAULT_PAGE_SIZE;
use std::str::FromStr;

/// Tunables for an [`OrderSystem`](super::OrderSystem).
///
/// | Variable                      | Default | Meaning                                 |
/// |-------------------------------|---------|-----------------------------------------|
/// | `PEDIDOS_CHANNEL_BUFFER`      | 32      | Mailbox capacity of each actor          |
/// | `PEDIDOS_PAGE_SIZE`           | 10      | Page size when a listing asks for 0     |
/// | `PEDIDOS_LOW_STOCK_THRESHOLD` | 10      | Stock below this counts as low          |
/// | `PEDIDOS_MAX_ORDER_QUANTITY`  | unset   | Optional cap on one order's quantity    |
///
/// Unparseable values fall back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    pub channel_buffer: usize,
    pub page_size: usize,
    pub low_stock_threshold: u32,
    pub max_order_quantity: Option<u32>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 32,
            page_size: DEFAULT_PAGE_SIZE,
            low_stock_threshold: 10,
            max_order_quantity: None,
        }
    }
}

impl SystemConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            channel_buffer: parse::<usize>(lookup("PEDIDOS_CHANNEL_BUFFER"))
                .filter(|n| *n > 0)
                .unwrap_or(defaults.channel_buffer),
            page_size: parse::<usize>(lookup("PEDIDOS_PAGE_SIZE"))
                .filter(|n| *n > 0)
                .unwrap_or(defaults.page_size),
            low_stock_threshold: parse(lookup("PEDIDOS_LOW_STOCK_THRESHOLD"))
                .unwrap_or(defaults.low_stock_threshold),
            max_order_quantity: parse(lookup("PEDIDOS_MAX_ORDER_QUANTITY")),
        }
    }
}

fn parse<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}
