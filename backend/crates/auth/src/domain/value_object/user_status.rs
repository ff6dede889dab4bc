//! User Status Value Object

/// Account status stored on the user row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Locked,
    Pending,
    Disabled,
}

impl UserStatus {
    /// Stable storage code
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Locked => "LOCKED",
            UserStatus::Pending => "PENDING",
            UserStatus::Disabled => "DISABLED",
        }
    }

    /// Parse a storage code
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ACTIVE" => Some(UserStatus::Active),
            "LOCKED" => Some(UserStatus::Locked),
            "PENDING" => Some(UserStatus::Pending),
            "DISABLED" => Some(UserStatus::Disabled),
            _ => None,
        }
    }
}
