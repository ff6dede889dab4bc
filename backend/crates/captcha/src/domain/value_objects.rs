//! Domain Value Objects

/// Kind of CAPTCHA challenge
///
/// Only arithmetic challenges exist today; the column is a varchar so
/// image or slider challenges can be added without a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    Math,
}

impl ChallengeKind {
    /// Stable storage code for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeKind::Math => "MATH",
        }
    }

    /// Parse a storage code
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MATH" => Some(ChallengeKind::Math),
            _ => None,
        }
    }
}

impl Default for ChallengeKind {
    fn default() -> Self {
        ChallengeKind::Math
    }
}
