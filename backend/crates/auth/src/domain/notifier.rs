//! SMS Notification Port
//!
//! Delivery is fire-and-forget: the login path never waits for a
//! delivery confirmation.

use crate::error::AuthResult;

/// Outbound SMS channel
#[trait_variant::make(SmsNotifier: Send)]
pub trait LocalSmsNotifier {
    /// Dispatch a verification code to a phone number
    async fn send_verification_code(&self, phone: &str, code: &str) -> AuthResult<()>;
}
