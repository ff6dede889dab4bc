//! Login Method Value Object

/// How the most recent login was authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMethod {
    Password,
    Sms,
}

impl LoginMethod {
    /// Stable storage code
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginMethod::Password => "PASSWORD",
            LoginMethod::Sms => "SMS",
        }
    }

    /// Parse a storage code
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PASSWORD" => Some(LoginMethod::Password),
            "SMS" => Some(LoginMethod::Sms),
            _ => None,
        }
    }
}
