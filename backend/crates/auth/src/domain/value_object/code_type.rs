//! Verification Code Type Value Object

/// Purpose tag for a verification code
///
/// Only login codes exist today; password-reset or binding codes would
/// add variants without a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeType {
    Login,
}

impl CodeType {
    /// Stable storage code
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeType::Login => "LOGIN",
        }
    }

    /// Parse a storage code
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "LOGIN" => Some(CodeType::Login),
            _ => None,
        }
    }
}
