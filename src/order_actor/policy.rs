//! Rules an order's quantity must satisfy.

/// Quantity rules applied to every reservation and revision.
///
/// A quantity must be at least 1. The upper bound is optional and off by default;
/// stock is the only other limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderPolicy {
    pub max_quantity: Option<u32>,
}

impl OrderPolicy {
    pub fn with_max_quantity(max_quantity: Option<u32>) -> Self {
        Self { max_quantity }
    }

    pub fn allows(&self, quantity: u32) -> bool {
        quantity > 0 && self.max_quantity.map_or(true, |max| quantity <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_always_invalid() {
        assert!(!OrderPolicy::default().allows(0));
        assert!(OrderPolicy::default().allows(u32::MAX));
    }

    #[test]
    fn test_cap_is_inclusive() {
        let policy = OrderPolicy::with_max_quantity(Some(1000));
        assert!(policy.allows(1000));
        assert!(!policy.allows(1001));
    }
}
