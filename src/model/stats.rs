use crate::model::{Order, OrderStatus, Product};
use serde::{Deserialize, Serialize};

/// Aggregate numbers for the administrator dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    pub pending: usize,
    pub processed: usize,
    pub shipped: usize,
    pub delivered: usize,
    /// Products whose stock is below the configured threshold.
    pub low_stock: usize,
}

impl AdminStats {
    pub fn collect(users: usize, products: &[Product], orders: &[Order], low_stock_threshold: u32) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
        Self {
            users,
            products: products.len(),
            orders: orders.len(),
            pending: count(OrderStatus::Pendiente),
            processed: count(OrderStatus::Procesado),
            shipped: count(OrderStatus::Enviado),
            delivered: count(OrderStatus::Entregado),
            low_stock: products
                .iter()
                .filter(|p| p.stock < low_stock_threshold)
                .count(),
        }
    }

    pub fn by_status(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pendiente => self.pending,
            OrderStatus::Procesado => self.processed,
            OrderStatus::Enviado => self.shipped,
            OrderStatus::Entregado => self.delivered,
        }
    }
}
