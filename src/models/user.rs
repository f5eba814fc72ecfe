use serde::{Deserialize, Serialize};

use crate::constants::OWNER_ROLE;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}

/// Role of a user within a team. Roles the backend adds later are kept verbatim.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Owner,
    Member,
    Other(String),
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            OWNER_ROLE => Role::Owner,
            "MEMBER" => Role::Member,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Owner => OWNER_ROLE.to_string(),
            Role::Member => "MEMBER".to_string(),
            Role::Other(other) => other,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Member {
    pub user: User,
    pub role: Role,
}

impl Member {
    pub fn new(name: &str, email: &str, role: Role) -> Self {
        Self {
            user: User {
                name: name.to_string(),
                email: email.to_string(),
            },
            role,
        }
    }

    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }

    pub fn same_user(&self, other: &Member) -> bool {
        let email = self.user.email.trim();
        let other_email = other.user.email.trim();
        if email.is_empty() || other_email.is_empty() {
            return email.is_empty() && other_email.is_empty() && self.user.name == other.user.name;
        }
        email.eq_ignore_ascii_case(other_email)
    }
}
