use crate::model::UserId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Account role. The names are the ones the business uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Cliente,
    Empleado,
}

impl Role {
    /// Admins and employees run the shop; clients only buy.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Empleado)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Admin => "Admin",
            Role::Cliente => "Cliente",
            Role::Empleado => "Empleado",
        };
        f.write_str(name)
    }
}

/// Who is asking. Passed explicitly into every operation that checks permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub user_id: UserId,
    pub role: Role,
}

impl Requester {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Staff may act on anyone's behalf, a client only on its own.
    pub fn can_act_for(&self, owner: UserId) -> bool {
        self.is_staff() || self.user_id == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_acts_only_for_itself() {
        let client = Requester::new(UserId(7), Role::Cliente);
        assert!(client.can_act_for(UserId(7)));
        assert!(!client.can_act_for(UserId(8)));

        let clerk = Requester::new(UserId(1), Role::Empleado);
        assert!(clerk.can_act_for(UserId(8)));
        assert!(!clerk.is_admin());
    }

    #[test]
    fn test_role_serializes_with_business_names() {
        assert_eq!(serde_json::to_string(&Role::Cliente).unwrap(), "\"Cliente\"");
        let role: Role = serde_json::from_str("\"Empleado\"").unwrap();
        assert_eq!(role, Role::Empleado);
    }
}
