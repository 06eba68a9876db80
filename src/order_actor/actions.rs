//! Custom actions for the Order actor.

use crate::model::{OrderStatus, Requester};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order one step along `Pendiente → Procesado → Enviado → Entregado`.
    /// Staff only.
    Advance { requester: Requester },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// The status the order moved to.
    Advanced(OrderStatus),
}
